use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Asynchronous notification pushed toward the web layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum BridgeEvent {
    #[serde(rename_all = "camelCase")]
    AudioSessionStarted { meeting_id: String },

    #[serde(rename_all = "camelCase")]
    AudioSessionStopped { meeting_id: String },

    LocalMuteChanged { muted: bool },

    #[serde(rename_all = "camelCase")]
    AudioDeviceChanged { device_id: String },
}

/// One-way event sink toward the web layer
///
/// Emitting never fails the caller; undeliverable events are dropped.
pub trait Emitter: Send + Sync {
    fn emit(&self, event: BridgeEvent);
}

/// Emitter backed by a broadcast channel
#[derive(Clone)]
pub struct ChannelEmitter {
    tx: broadcast::Sender<BridgeEvent>,
}

impl ChannelEmitter {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.tx.subscribe()
    }
}

impl Default for ChannelEmitter {
    fn default() -> Self {
        Self::new(64)
    }
}

impl Emitter for ChannelEmitter {
    fn emit(&self, event: BridgeEvent) {
        if let Err(e) = self.tx.send(event) {
            debug!("No event subscribers, dropped {:?}", e.0);
        }
    }
}
