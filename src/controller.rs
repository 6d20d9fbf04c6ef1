//! Session controller
//!
//! Owns at most one meeting session and exposes the full command surface
//! the web layer drives: lifecycle (`configure`, `start`, `stop`), audio
//! control, device management and permission negotiation.
//!
//! Operations take `&mut self`, so everything touching the session is
//! serialized through the single owner. Callers sharing a controller wrap it
//! in a `tokio::sync::Mutex`; a `configure` issued while `start` is pending
//! then waits for the start to resolve before disposing that session.

use crate::error::{
    BridgeError, JOIN_DATA_UNPARSABLE, PAUSE_AUDIO_FAILED, RESUME_AUDIO_FAILED,
    SESSION_ALREADY_STARTED, START_FAILED,
};
use crate::events::Emitter;
use crate::permissions::{PermissionNegotiator, PermissionOracle, PermissionState};
use crate::session::{
    project, AudioDevice, ControllerState, ControllerStatus, DeviceSelector, JoinConfigParser,
    MeetingBackend, MeetingBackendFactory,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

/// The single session owned by the controller
struct ActiveSession {
    id: String,
    meeting_id: String,
    backend: Box<dyn MeetingBackend>,
    state: ControllerState,
    configured_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
}

impl ActiveSession {
    fn new(meeting_id: String, backend: Box<dyn MeetingBackend>) -> Self {
        Self {
            id: format!("session-{}", uuid::Uuid::new_v4()),
            meeting_id,
            backend,
            state: ControllerState::Configured,
            configured_at: Utc::now(),
            started_at: None,
        }
    }
}

/// Owned slot holding at most one session
///
/// The only way in is `replace`, which disposes the previous occupant
/// before the new one is constructed.
#[derive(Default)]
struct SessionSlot {
    active: Option<ActiveSession>,
}

impl SessionSlot {
    fn replace(&mut self, construct: impl FnOnce() -> ActiveSession) -> &ActiveSession {
        self.clear();
        self.active.insert(construct())
    }

    /// Dispose and drop the current session; `false` if the slot was empty
    fn clear(&mut self) -> bool {
        match self.active.take() {
            Some(mut previous) => {
                info!("Disposing session {} ({})", previous.id, previous.backend.name());
                previous.backend.dispose();
                true
            }
            None => false,
        }
    }

    fn get(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    fn get_mut(&mut self) -> Result<&mut ActiveSession, BridgeError> {
        self.active.as_mut().ok_or_else(BridgeError::no_session)
    }
}

/// Top-level facade between the web layer and the meeting session
pub struct SessionController {
    emitter: Arc<dyn Emitter>,
    parser: Arc<dyn JoinConfigParser>,
    factory: Arc<dyn MeetingBackendFactory>,
    negotiator: PermissionNegotiator,
    slot: SessionSlot,
}

impl SessionController {
    pub fn new(
        emitter: Arc<dyn Emitter>,
        parser: Arc<dyn JoinConfigParser>,
        factory: Arc<dyn MeetingBackendFactory>,
        oracle: Arc<dyn PermissionOracle>,
    ) -> Self {
        Self {
            emitter,
            parser,
            factory,
            negotiator: PermissionNegotiator::new(oracle),
            slot: SessionSlot::default(),
        }
    }

    /// Parse a join payload and replace the current session with a new one
    ///
    /// A payload that fails to parse leaves the current session untouched.
    pub fn configure(&mut self, blob: &[u8]) -> Result<(), BridgeError> {
        let config = self.parser.parse(blob).map_err(|e| {
            warn!("Rejected join payload: {:#}", e);
            BridgeError::Parse(JOIN_DATA_UNPARSABLE.to_string())
        })?;

        let meeting_id = config.meeting_id.clone();
        let factory = Arc::clone(&self.factory);
        let emitter = Arc::clone(&self.emitter);

        let session = self.slot.replace(move || {
            let backend = factory.create(config, emitter);
            ActiveSession::new(meeting_id, backend)
        });

        info!(
            "Configured session {} for meeting {} ({})",
            session.id,
            session.meeting_id,
            session.backend.name()
        );
        Ok(())
    }

    pub async fn start(&mut self) -> Result<(), BridgeError> {
        let session = self.slot.get_mut()?;

        if session.state == ControllerState::Started {
            warn!("Session {} already started", session.id);
            return Err(BridgeError::State(SESSION_ALREADY_STARTED.to_string()));
        }

        info!("Starting session {}", session.id);

        match session.backend.start().await {
            Ok(()) => {
                session.state = ControllerState::Started;
                session.started_at = Some(Utc::now());
                info!("Session {} started successfully", session.id);
                Ok(())
            }
            Err(e) => {
                error!("Failed to start session {}: {:#}", session.id, e);
                Err(BridgeError::Operation(START_FAILED.to_string()))
            }
        }
    }

    pub fn stop(&mut self) -> Result<(), BridgeError> {
        let session = self.slot.get_mut()?;

        info!("Stopping session {}", session.id);
        session.backend.stop();
        session.state = ControllerState::Stopped;
        Ok(())
    }

    /// Mute local audio. The backend decides whether that is possible in
    /// its current media state.
    pub fn pause_audio(&mut self) -> Result<(), BridgeError> {
        let session = self.slot.get_mut()?;

        if session.backend.pause_audio() {
            info!("Session {} audio paused", session.id);
            Ok(())
        } else {
            error!("Session {} refused to pause audio", session.id);
            Err(BridgeError::Operation(PAUSE_AUDIO_FAILED.to_string()))
        }
    }

    pub fn resume_audio(&mut self) -> Result<(), BridgeError> {
        let session = self.slot.get_mut()?;

        if session.backend.resume_audio() {
            info!("Session {} audio resumed", session.id);
            Ok(())
        } else {
            error!("Session {} refused to resume audio", session.id);
            Err(BridgeError::Operation(RESUME_AUDIO_FAILED.to_string()))
        }
    }

    /// Select the active audio input from a `{ deviceId }` payload
    ///
    /// The identifier goes to the backend as-is; it owns what happens with
    /// an unknown one.
    pub fn set_audio_device(&mut self, payload: &[u8]) -> Result<(), BridgeError> {
        let selector = DeviceSelector::from_slice(payload)?;
        let session = self.slot.get_mut()?;

        info!("Session {} selecting audio device {:?}", session.id, selector.device_id);
        session.backend.set_audio_device(&selector.device_id);
        Ok(())
    }

    /// Audio inputs of the current session; empty when there is none
    pub fn get_audio_devices(&self) -> Vec<AudioDevice> {
        match self.slot.get() {
            Some(session) => project(&session.backend.list_audio_devices()),
            None => Vec::new(),
        }
    }

    pub fn get_permissions(&self, payload: &[u8]) -> Result<PermissionState, BridgeError> {
        self.negotiator.get_permissions(payload)
    }

    pub async fn request_permissions(&self, payload: &[u8]) -> Result<PermissionState, BridgeError> {
        self.negotiator.request_permissions(payload).await
    }

    /// Handle to the permission negotiator, usable without holding the controller
    pub fn permissions(&self) -> PermissionNegotiator {
        self.negotiator.clone()
    }

    pub fn state(&self) -> ControllerState {
        self.slot
            .get()
            .map(|session| session.state)
            .unwrap_or(ControllerState::NoSession)
    }

    pub fn status(&self) -> ControllerStatus {
        match self.slot.get() {
            Some(session) => ControllerStatus {
                state: session.state,
                session_id: Some(session.id.clone()),
                meeting_id: Some(session.meeting_id.clone()),
                backend: Some(session.backend.name().to_string()),
                configured_at: Some(session.configured_at),
                started_at: session.started_at,
            },
            None => ControllerStatus::idle(),
        }
    }

    /// Dispose the owned session, if any
    pub fn shutdown(&mut self) {
        if self.slot.clear() {
            info!("Controller shut down");
        }
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
