use crate::payload::decode_object;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Capture media kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Audio,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// What the web layer asked for, per media kind
///
/// Wire form is an optional boolean: absent/`null` is `Unset`,
/// `true` is `RequestedOn`, `false` is `RequestedOff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum ConstraintValue {
    #[default]
    Unset,
    RequestedOn,
    RequestedOff,
}

impl ConstraintValue {
    pub fn is_requested(self) -> bool {
        self == ConstraintValue::RequestedOn
    }

    pub fn is_unset(self) -> bool {
        self == ConstraintValue::Unset
    }
}

impl From<Option<bool>> for ConstraintValue {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => ConstraintValue::Unset,
            Some(true) => ConstraintValue::RequestedOn,
            Some(false) => ConstraintValue::RequestedOff,
        }
    }
}

impl From<ConstraintValue> for Option<bool> {
    fn from(value: ConstraintValue) -> Self {
        match value {
            ConstraintValue::Unset => None,
            ConstraintValue::RequestedOn => Some(true),
            ConstraintValue::RequestedOff => Some(false),
        }
    }
}

/// Resolved authorization, per media kind
///
/// Same wire shape as [`ConstraintValue`]: absent/`null` is
/// `NotApplicable`, `true` is `Granted`, `false` is `Denied`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum PermissionValue {
    #[default]
    NotApplicable,
    Granted,
    Denied,
}

impl PermissionValue {
    pub fn from_granted(granted: bool) -> Self {
        if granted {
            PermissionValue::Granted
        } else {
            PermissionValue::Denied
        }
    }

    pub fn is_not_applicable(self) -> bool {
        self == PermissionValue::NotApplicable
    }
}

impl From<Option<bool>> for PermissionValue {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => PermissionValue::NotApplicable,
            Some(true) => PermissionValue::Granted,
            Some(false) => PermissionValue::Denied,
        }
    }
}

impl From<PermissionValue> for Option<bool> {
    fn from(value: PermissionValue) -> Self {
        match value {
            PermissionValue::NotApplicable => None,
            PermissionValue::Granted => Some(true),
            PermissionValue::Denied => Some(false),
        }
    }
}

// serde hands skip predicates a reference
fn unset(value: &ConstraintValue) -> bool {
    value.is_unset()
}

fn not_applicable(value: &PermissionValue) -> bool {
    value.is_not_applicable()
}

/// Constraint payload: `{ audio?: boolean, video?: boolean }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaConstraint {
    #[serde(default, skip_serializing_if = "unset")]
    pub audio: ConstraintValue,

    #[serde(default, skip_serializing_if = "unset")]
    pub video: ConstraintValue,
}

impl MediaConstraint {
    pub fn new(audio: ConstraintValue, video: ConstraintValue) -> Self {
        Self { audio, video }
    }

    /// Decode a serialized constraint; `None` when the payload is malformed
    ///
    /// Only the keyed-object form is accepted.
    pub fn from_slice(payload: &[u8]) -> Option<Self> {
        decode_object(payload).ok()
    }

    pub fn get(&self, kind: MediaKind) -> ConstraintValue {
        match kind {
            MediaKind::Audio => self.audio,
            MediaKind::Video => self.video,
        }
    }
}

/// Permission/state response payload: `{ audio?: boolean, video?: boolean }`
///
/// `NotApplicable` fields are omitted from the serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionState {
    #[serde(default, skip_serializing_if = "not_applicable")]
    pub audio: PermissionValue,

    #[serde(default, skip_serializing_if = "not_applicable")]
    pub video: PermissionValue,
}

impl PermissionState {
    pub fn new(audio: PermissionValue, video: PermissionValue) -> Self {
        Self { audio, video }
    }
}
