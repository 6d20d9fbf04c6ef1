// Test doubles shared by the integration tests
#![allow(dead_code)]

use anyhow::{bail, Result};
use meeting_bridge::{
    AuthorizationStatus, BridgeEvent, ChannelEmitter, Emitter, JsonJoinConfigParser, MediaDevice,
    MediaKind, MeetingBackend, MeetingBackendFactory, PermissionOracle, SessionConfig,
    SessionController,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Ordered record of backend calls, e.g. `["create:A", "dispose:A", "create:B"]`
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }

    pub fn count(&self, entry: &str) -> usize {
        self.entries().iter().filter(|e| *e == entry).count()
    }
}

pub struct FakeBackend {
    meeting_id: String,
    log: CallLog,
    fail_start: bool,
    refuse_audio: bool,
}

#[async_trait::async_trait]
impl MeetingBackend for FakeBackend {
    async fn start(&mut self) -> Result<()> {
        self.log.push(format!("start:{}", self.meeting_id));
        if self.fail_start {
            bail!("engine refused to join");
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.log.push(format!("stop:{}", self.meeting_id));
    }

    fn pause_audio(&mut self) -> bool {
        self.log.push(format!("pause:{}", self.meeting_id));
        !self.refuse_audio
    }

    fn resume_audio(&mut self) -> bool {
        self.log.push(format!("resume:{}", self.meeting_id));
        !self.refuse_audio
    }

    fn set_audio_device(&mut self, label: &str) {
        self.log.push(format!("select:{}:{}", self.meeting_id, label));
    }

    fn list_audio_devices(&self) -> Vec<MediaDevice> {
        vec![
            MediaDevice::new(format!("{} Microphone", self.meeting_id)),
            MediaDevice::new(format!("{} Headset", self.meeting_id)),
        ]
    }

    fn dispose(&mut self) {
        self.log.push(format!("dispose:{}", self.meeting_id));
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Factory logging construction start and end around each backend
#[derive(Clone, Default)]
pub struct FakeFactory {
    pub log: CallLog,
    pub fail_start: bool,
    pub refuse_audio: bool,
}

impl MeetingBackendFactory for FakeFactory {
    fn create(&self, config: SessionConfig, _emitter: Arc<dyn Emitter>) -> Box<dyn MeetingBackend> {
        self.log.push(format!("create:{}", config.meeting_id));
        let backend = FakeBackend {
            meeting_id: config.meeting_id.clone(),
            log: self.log.clone(),
            fail_start: self.fail_start,
            refuse_audio: self.refuse_audio,
        };
        self.log.push(format!("constructed:{}", config.meeting_id));
        Box::new(backend)
    }
}

/// Oracle with fixed statuses that counts every call
pub struct CountingOracle {
    pub audio: AuthorizationStatus,
    pub video: AuthorizationStatus,
    pub grant: bool,
    pub queries: AtomicUsize,
    pub requests: AtomicUsize,
    /// When set, prompts wait for a notification before resolving
    pub gate: Option<Arc<Notify>>,
}

impl CountingOracle {
    pub fn new(audio: AuthorizationStatus, grant: bool) -> Self {
        Self {
            audio,
            video: AuthorizationStatus::Authorized,
            grant,
            queries: AtomicUsize::new(0),
            requests: AtomicUsize::new(0),
            gate: None,
        }
    }

    pub fn gated(grant: bool, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(AuthorizationStatus::NotDetermined, grant)
        }
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PermissionOracle for CountingOracle {
    fn authorization_status(&self, kind: MediaKind) -> AuthorizationStatus {
        self.queries.fetch_add(1, Ordering::SeqCst);
        match kind {
            MediaKind::Audio => self.audio,
            MediaKind::Video => self.video,
        }
    }

    async fn request_access(&self, _kind: MediaKind) -> bool {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.grant
    }
}

/// Emitter collecting events in memory
#[derive(Default)]
pub struct RecordingEmitter {
    pub events: Mutex<Vec<BridgeEvent>>,
}

impl Emitter for RecordingEmitter {
    fn emit(&self, event: BridgeEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Join payload for a meeting with the given id
pub fn join_payload(meeting_id: &str) -> Vec<u8> {
    serde_json::json!({
        "Meeting": {
            "MeetingId": meeting_id,
            "MediaRegion": "ap-northeast-2",
            "MediaPlacement": {
                "AudioHostUrl": "audio.example.net:3478",
                "SignalingUrl": "wss://signal.example.net/control"
            }
        },
        "Attendee": {
            "AttendeeId": "attendee-1",
            "JoinToken": "token-1"
        }
    })
    .to_string()
    .into_bytes()
}

pub fn controller_with(factory: FakeFactory, oracle: Arc<CountingOracle>) -> SessionController {
    SessionController::new(
        Arc::new(ChannelEmitter::default()),
        Arc::new(JsonJoinConfigParser),
        Arc::new(factory),
        oracle,
    )
}

pub fn controller(factory: FakeFactory) -> SessionController {
    controller_with(
        factory,
        Arc::new(CountingOracle::new(AuthorizationStatus::Authorized, true)),
    )
}
