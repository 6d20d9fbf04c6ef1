//! Bridge error types.
//!
//! Every failing controller operation reports exactly one `BridgeError`.
//! The web layer historically only displayed the message text, so the
//! messages are kept stable; the variant adds a kind callers can branch on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NO_SESSION: &str = "MeetingSession not exist";
pub const SESSION_ALREADY_STARTED: &str = "MeetingSession already started";
pub const JOIN_DATA_UNPARSABLE: &str = "Failed to parse joinMeetingData";
pub const START_FAILED: &str = "Failed to start session";
pub const WRONG_CONSTRAINT: &str = "Wrong Constraint";
pub const VIDEO_NOT_IMPLEMENTED: &str = "Not Implemented for Video Permission";
pub const PAUSE_AUDIO_FAILED: &str = "Failed at meetingSession.pauseAudio";
pub const RESUME_AUDIO_FAILED: &str = "Failed at meetingSession.resumeAudio";
pub const DEVICE_ID_MISSING: &str = "DeviceId not exist";

/// Error returned by every controller operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// Input payload does not match the expected schema. Nothing was applied.
    #[error("{0}")]
    Parse(String),

    /// Operation needs a session (or session state) that is absent.
    #[error("{0}")]
    State(String),

    /// The underlying session or oracle reported failure.
    #[error("{0}")]
    Operation(String),

    /// Operation targets a capability that is deliberately unsupported.
    #[error("{0}")]
    NotImplemented(String),
}

/// Discriminant of a [`BridgeError`], as seen on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    ParseError,
    StateError,
    OperationFailure,
    NotImplementedError,
}

impl BridgeError {
    pub fn no_session() -> Self {
        BridgeError::State(NO_SESSION.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::Parse(_) => ErrorKind::ParseError,
            BridgeError::State(_) => ErrorKind::StateError,
            BridgeError::Operation(_) => ErrorKind::OperationFailure,
            BridgeError::NotImplemented(_) => ErrorKind::NotImplementedError,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            BridgeError::Parse(m)
            | BridgeError::State(m)
            | BridgeError::Operation(m)
            | BridgeError::NotImplemented(m) => m,
        }
    }

    /// Wire form of this error: `{ "kind": ..., "message": ... }`
    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            kind: self.kind(),
            message: self.message().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub kind: ErrorKind,
    pub message: String,
}
