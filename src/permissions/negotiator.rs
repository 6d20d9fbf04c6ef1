use super::oracle::{AuthorizationStatus, PermissionOracle};
use super::types::{MediaConstraint, MediaKind, PermissionState, PermissionValue};
use crate::error::{BridgeError, VIDEO_NOT_IMPLEMENTED, WRONG_CONSTRAINT};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Permission query & request policy on top of a [`PermissionOracle`]
///
/// Cheap to clone: a pending prompt can be awaited on a clone while the
/// controller that handed it out keeps serving session commands.
#[derive(Clone)]
pub struct PermissionNegotiator {
    oracle: Arc<dyn PermissionOracle>,
}

impl PermissionNegotiator {
    pub fn new(oracle: Arc<dyn PermissionOracle>) -> Self {
        Self { oracle }
    }

    /// Read current authorization for a serialized constraint
    pub fn get_permissions(&self, payload: &[u8]) -> Result<PermissionState, BridgeError> {
        let constraint = decode(payload)?;
        Ok(self.query(&constraint))
    }

    /// Read current authorization, consulting the oracle only for
    /// kinds requested `On`
    pub fn query(&self, constraint: &MediaConstraint) -> PermissionState {
        PermissionState {
            audio: self.query_kind(constraint, MediaKind::Audio),
            video: self.query_kind(constraint, MediaKind::Video),
        }
    }

    fn query_kind(&self, constraint: &MediaConstraint, kind: MediaKind) -> PermissionValue {
        if !constraint.get(kind).is_requested() {
            return PermissionValue::NotApplicable;
        }

        let status = self.oracle.authorization_status(kind);
        debug!("{} authorization status: {:?}", kind, status);

        match status {
            AuthorizationStatus::NotDetermined => PermissionValue::NotApplicable,
            AuthorizationStatus::Restricted | AuthorizationStatus::Denied => PermissionValue::Denied,
            AuthorizationStatus::Authorized => PermissionValue::Granted,
            AuthorizationStatus::Unknown => PermissionValue::NotApplicable,
        }
    }

    /// Prompt for authorization for a serialized constraint
    pub async fn request_permissions(&self, payload: &[u8]) -> Result<PermissionState, BridgeError> {
        let constraint = decode(payload)?;
        self.request(constraint).await
    }

    /// Prompt for authorization
    ///
    /// Video is unsupported and fails before anything else is looked at.
    /// Audio prompts at most once per call; a non-request resolves to
    /// `Denied` without touching the oracle. Concurrent calls are not
    /// coalesced.
    pub async fn request(&self, constraint: MediaConstraint) -> Result<PermissionState, BridgeError> {
        if constraint.video.is_requested() {
            warn!("Video permission request rejected: not implemented");
            return Err(BridgeError::NotImplemented(VIDEO_NOT_IMPLEMENTED.to_string()));
        }

        let audio_granted = if constraint.audio.is_requested() {
            info!("Requesting audio permission");
            let granted = self.oracle.request_access(MediaKind::Audio).await;
            info!("Audio permission prompt resolved: granted={}", granted);
            granted
        } else {
            false
        };

        Ok(PermissionState {
            audio: PermissionValue::from_granted(audio_granted),
            video: PermissionValue::Denied,
        })
    }
}

fn decode(payload: &[u8]) -> Result<MediaConstraint, BridgeError> {
    MediaConstraint::from_slice(payload).ok_or_else(|| {
        warn!("Rejected malformed media constraint ({} bytes)", payload.len());
        BridgeError::Parse(WRONG_CONSTRAINT.to_string())
    })
}
