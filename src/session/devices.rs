use super::backend::MediaDevice;
use crate::error::{BridgeError, DEVICE_ID_MISSING};
use crate::payload::decode_object;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GROUP_ID: &str = "DefaultGroupId";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioDeviceKind {
    #[serde(rename = "audio-input")]
    AudioInput,
}

/// Audio input as presented to the web layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioDevice {
    pub device_id: String,
    pub group_id: String,
    pub kind: AudioDeviceKind,
    pub label: String,
}

impl From<&MediaDevice> for AudioDevice {
    fn from(device: &MediaDevice) -> Self {
        // The label doubles as the identifier
        Self {
            device_id: device.label.clone(),
            group_id: DEFAULT_GROUP_ID.to_string(),
            kind: AudioDeviceKind::AudioInput,
            label: device.label.clone(),
        }
    }
}

/// Request to make a device the active audio input: `{ deviceId: string }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSelector {
    pub device_id: String,
}

impl DeviceSelector {
    pub fn from_slice(payload: &[u8]) -> Result<Self, BridgeError> {
        decode_object(payload).map_err(|_| BridgeError::Parse(DEVICE_ID_MISSING.to_string()))
    }
}

pub fn project(devices: &[MediaDevice]) -> Vec<AudioDevice> {
    devices.iter().map(AudioDevice::from).collect()
}
