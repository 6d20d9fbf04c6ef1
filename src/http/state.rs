use crate::controller::SessionController;
use crate::events::ChannelEmitter;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The single controller every command is serialized through
    pub controller: Arc<Mutex<SessionController>>,

    /// Event sink shared with the controller's sessions
    pub events: ChannelEmitter,
}

impl AppState {
    pub fn new(controller: SessionController, events: ChannelEmitter) -> Self {
        Self {
            controller: Arc::new(Mutex::new(controller)),
            events,
        }
    }
}
