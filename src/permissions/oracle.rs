use super::types::MediaKind;
use serde::Deserialize;
use std::sync::Mutex;
use tracing::info;

/// OS-level capture authorization status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthorizationStatus {
    /// The user has not been asked yet
    NotDetermined,
    /// Capture is blocked by policy (parental controls, MDM)
    Restricted,
    Denied,
    Authorized,
    /// A status this bridge does not know about
    Unknown,
}

/// Authority that grants or denies capture permissions
///
/// Implementations wrap the platform permission subsystem. The bridge only
/// queries it, it never owns the decision.
#[async_trait::async_trait]
pub trait PermissionOracle: Send + Sync {
    /// Current authorization status, without prompting
    fn authorization_status(&self, kind: MediaKind) -> AuthorizationStatus;

    /// Show the authorization prompt and resolve to the user's decision
    async fn request_access(&self, kind: MediaKind) -> bool;
}

/// Oracle with fixed, configured answers
///
/// Used by the service binary where no platform permission subsystem is
/// reachable. A prompt resolves to `grant_on_prompt` and records the
/// decision, so later queries see `Authorized`/`Denied` like a real OS would.
pub struct StaticPermissionOracle {
    audio: Mutex<AuthorizationStatus>,
    video: Mutex<AuthorizationStatus>,
    grant_on_prompt: bool,
}

impl StaticPermissionOracle {
    pub fn new(audio: AuthorizationStatus, video: AuthorizationStatus, grant_on_prompt: bool) -> Self {
        Self {
            audio: Mutex::new(audio),
            video: Mutex::new(video),
            grant_on_prompt,
        }
    }

    fn slot(&self, kind: MediaKind) -> &Mutex<AuthorizationStatus> {
        match kind {
            MediaKind::Audio => &self.audio,
            MediaKind::Video => &self.video,
        }
    }
}

#[async_trait::async_trait]
impl PermissionOracle for StaticPermissionOracle {
    fn authorization_status(&self, kind: MediaKind) -> AuthorizationStatus {
        match self.slot(kind).lock() {
            Ok(status) => *status,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    async fn request_access(&self, kind: MediaKind) -> bool {
        let granted = self.grant_on_prompt;
        let decided = if granted {
            AuthorizationStatus::Authorized
        } else {
            AuthorizationStatus::Denied
        };

        match self.slot(kind).lock() {
            Ok(mut status) => *status = decided,
            Err(poisoned) => *poisoned.into_inner() = decided,
        }

        info!("Simulated {} permission prompt resolved: granted={}", kind, granted);
        granted
    }
}
