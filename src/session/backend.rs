use super::config::SessionConfig;
use crate::events::Emitter;
use anyhow::Result;
use std::sync::Arc;

/// Audio route as reported by the conferencing engine
///
/// The engine exposes no stable identifier; the label is all there is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDevice {
    pub label: String,
}

impl MediaDevice {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

/// One native conferencing session
///
/// Implementations wrap the conferencing engine; the controller owns
/// exactly one at a time and calls `dispose` before dropping it.
#[async_trait::async_trait]
pub trait MeetingBackend: Send + Sync {
    /// Connect audio/video and join the meeting
    async fn start(&mut self) -> Result<()>;

    /// Leave the meeting (fire-and-forget)
    fn stop(&mut self);

    /// Mute local audio; `false` if the engine refused
    fn pause_audio(&mut self) -> bool;

    /// Unmute local audio; `false` if the engine refused
    fn resume_audio(&mut self) -> bool;

    /// Make the device with this label the active audio input
    fn set_audio_device(&mut self, label: &str);

    fn list_audio_devices(&self) -> Vec<MediaDevice>;

    /// Release everything the session holds
    fn dispose(&mut self);

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Constructor for [`MeetingBackend`]s
pub trait MeetingBackendFactory: Send + Sync {
    fn create(&self, config: SessionConfig, emitter: Arc<dyn Emitter>) -> Box<dyn MeetingBackend>;
}
