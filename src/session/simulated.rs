// In-process meeting backend for running the bridge without a conferencing engine

use anyhow::{bail, Result};
use std::sync::Arc;
use tracing::{info, warn};

use super::backend::{MediaDevice, MeetingBackend, MeetingBackendFactory};
use super::config::SessionConfig;
use crate::events::{BridgeEvent, Emitter};

/// Simulated meeting session
///
/// Joins instantly, tracks mute and device selection, and reports through
/// the emitter the way an engine observer would.
pub struct SimulatedBackend {
    config: SessionConfig,
    emitter: Arc<dyn Emitter>,
    devices: Vec<MediaDevice>,
    fail_start: bool,
    started: bool,
    muted: bool,
    active_device: Option<String>,
    disposed: bool,
}

impl SimulatedBackend {
    pub fn new(
        config: SessionConfig,
        emitter: Arc<dyn Emitter>,
        devices: Vec<MediaDevice>,
        fail_start: bool,
    ) -> Self {
        info!(
            "Simulated session created for meeting {} ({} audio devices)",
            config.meeting_id,
            devices.len()
        );

        let active_device = devices.first().map(|d| d.label.clone());

        Self {
            config,
            emitter,
            devices,
            fail_start,
            started: false,
            muted: false,
            active_device,
            disposed: false,
        }
    }

    pub fn active_device(&self) -> Option<&str> {
        self.active_device.as_deref()
    }
}

#[async_trait::async_trait]
impl MeetingBackend for SimulatedBackend {
    async fn start(&mut self) -> Result<()> {
        if self.disposed {
            bail!("Session already disposed");
        }
        if self.fail_start {
            bail!("Simulated start failure for meeting {}", self.config.meeting_id);
        }

        self.started = true;
        self.emitter.emit(BridgeEvent::AudioSessionStarted {
            meeting_id: self.config.meeting_id.clone(),
        });
        Ok(())
    }

    fn stop(&mut self) {
        if !self.started {
            return;
        }

        self.started = false;
        self.emitter.emit(BridgeEvent::AudioSessionStopped {
            meeting_id: self.config.meeting_id.clone(),
        });
    }

    fn pause_audio(&mut self) -> bool {
        if !self.started {
            return false;
        }
        self.muted = true;
        self.emitter.emit(BridgeEvent::LocalMuteChanged { muted: true });
        true
    }

    fn resume_audio(&mut self) -> bool {
        if !self.started {
            return false;
        }
        self.muted = false;
        self.emitter.emit(BridgeEvent::LocalMuteChanged { muted: false });
        true
    }

    fn set_audio_device(&mut self, label: &str) {
        match self.devices.iter().find(|d| d.label == label) {
            Some(device) => {
                self.active_device = Some(device.label.clone());
                self.emitter.emit(BridgeEvent::AudioDeviceChanged {
                    device_id: device.label.clone(),
                });
            }
            None => warn!("No audio device labelled {:?}, selection ignored", label),
        }
    }

    fn list_audio_devices(&self) -> Vec<MediaDevice> {
        self.devices.clone()
    }

    fn dispose(&mut self) {
        self.stop();
        self.disposed = true;
    }

    fn name(&self) -> &str {
        "simulated"
    }
}

/// Factory for [`SimulatedBackend`]s sharing one device list
pub struct SimulatedBackendFactory {
    devices: Vec<MediaDevice>,
    fail_start: bool,
}

impl SimulatedBackendFactory {
    pub fn new(labels: &[String], fail_start: bool) -> Self {
        Self {
            devices: labels.iter().map(MediaDevice::new).collect(),
            fail_start,
        }
    }
}

impl MeetingBackendFactory for SimulatedBackendFactory {
    fn create(&self, config: SessionConfig, emitter: Arc<dyn Emitter>) -> Box<dyn MeetingBackend> {
        Box::new(SimulatedBackend::new(
            config,
            emitter,
            self.devices.clone(),
            self.fail_start,
        ))
    }
}
