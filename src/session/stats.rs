use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of the controller's session slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ControllerState {
    NoSession,
    Configured,
    Started,
    Stopped,
}

/// Snapshot of the controller for status reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerStatus {
    pub state: ControllerState,

    /// Identifier of the owned session, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Meeting the owned session joins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_id: Option<String>,

    /// Backend name (e.g., "simulated")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub configured_at: Option<DateTime<Utc>>,

    /// When the session last started successfully
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

impl ControllerStatus {
    pub fn idle() -> Self {
        Self {
            state: ControllerState::NoSession,
            session_id: None,
            meeting_id: None,
            backend: None,
            configured_at: None,
            started_at: None,
        }
    }
}
