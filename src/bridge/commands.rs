use crate::error::{BridgeError, ErrorPayload};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Command envelope sent by the web layer
///
/// `{ "action": "<name>", "payload": <value> }`. Payloads are carried as
/// raw JSON and only decoded by the operation that owns their schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "camelCase")]
pub enum BridgeCommand {
    Configure(Value),
    Start,
    Stop,
    PauseAudio,
    ResumeAudio,
    GetPermissions(Value),
    RequestPermissions(Value),
    SetAudioDevice(Value),
    GetAudioDevices,
}

impl BridgeCommand {
    pub fn from_slice(payload: &[u8]) -> Result<Self, BridgeError> {
        serde_json::from_slice(payload)
            .map_err(|e| BridgeError::Parse(format!("Malformed bridge command: {}", e)))
    }

    pub fn action(&self) -> &'static str {
        match self {
            BridgeCommand::Configure(_) => "configure",
            BridgeCommand::Start => "start",
            BridgeCommand::Stop => "stop",
            BridgeCommand::PauseAudio => "pauseAudio",
            BridgeCommand::ResumeAudio => "resumeAudio",
            BridgeCommand::GetPermissions(_) => "getPermissions",
            BridgeCommand::RequestPermissions(_) => "requestPermissions",
            BridgeCommand::SetAudioDevice(_) => "setAudioDevice",
            BridgeCommand::GetAudioDevices => "getAudioDevices",
        }
    }
}

/// Serialized bytes of a command payload
///
/// A JSON string is taken to be the already-serialized blob.
pub fn payload_bytes(value: &Value) -> Vec<u8> {
    match value {
        Value::String(raw) => raw.as_bytes().to_vec(),
        other => other.to_string().into_bytes(),
    }
}

/// Response envelope returned to the web layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub ok: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

impl CommandResponse {
    pub fn success(result: Option<Value>) -> Self {
        Self {
            ok: true,
            result,
            error: None,
        }
    }

    pub fn failure(error: &BridgeError) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(error.to_payload()),
        }
    }
}

impl From<Result<Option<Value>, BridgeError>> for CommandResponse {
    fn from(outcome: Result<Option<Value>, BridgeError>) -> Self {
        match outcome {
            Ok(result) => CommandResponse::success(result),
            Err(e) => CommandResponse::failure(&e),
        }
    }
}
