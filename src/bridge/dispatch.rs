use super::commands::{payload_bytes, BridgeCommand, CommandResponse};
use crate::controller::SessionController;
use crate::error::BridgeError;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Decode and run one command against a shared controller
///
/// Permission prompts are awaited on a negotiator handle after the lock is
/// released; every other command runs under the lock.
pub async fn dispatch(controller: &Mutex<SessionController>, payload: &[u8]) -> CommandResponse {
    let command = match BridgeCommand::from_slice(payload) {
        Ok(command) => command,
        Err(e) => {
            warn!("{}", e);
            return CommandResponse::failure(&e);
        }
    };

    let action = command.action();
    info!("Bridge command: {}", action);

    let outcome = match command {
        BridgeCommand::RequestPermissions(constraint) => {
            let negotiator = controller.lock().await.permissions();
            match negotiator.request_permissions(&payload_bytes(&constraint)).await {
                Ok(state) => to_result(&state),
                Err(e) => Err(e),
            }
        }
        command => {
            let mut controller = controller.lock().await;
            execute(&mut controller, command).await
        }
    };

    respond(action, outcome)
}

/// Run one decoded command against an exclusively held controller
pub async fn execute(
    controller: &mut SessionController,
    command: BridgeCommand,
) -> Result<Option<Value>, BridgeError> {
    match command {
        BridgeCommand::Configure(blob) => controller.configure(&payload_bytes(&blob)).map(|_| None),
        BridgeCommand::Start => controller.start().await.map(|_| None),
        BridgeCommand::Stop => controller.stop().map(|_| None),
        BridgeCommand::PauseAudio => controller.pause_audio().map(|_| None),
        BridgeCommand::ResumeAudio => controller.resume_audio().map(|_| None),
        BridgeCommand::GetPermissions(constraint) => {
            let state = controller.get_permissions(&payload_bytes(&constraint))?;
            to_result(&state)
        }
        BridgeCommand::RequestPermissions(constraint) => {
            // No controller borrow across the prompt
            let negotiator = controller.permissions();
            let state = negotiator
                .request_permissions(&payload_bytes(&constraint))
                .await?;
            to_result(&state)
        }
        BridgeCommand::SetAudioDevice(selector) => controller
            .set_audio_device(&payload_bytes(&selector))
            .map(|_| None),
        BridgeCommand::GetAudioDevices => to_result(&controller.get_audio_devices()),
    }
}

impl SessionController {
    /// Serialized command in, response envelope out
    pub async fn command(&mut self, payload: &[u8]) -> CommandResponse {
        let command = match BridgeCommand::from_slice(payload) {
            Ok(command) => command,
            Err(e) => {
                warn!("{}", e);
                return CommandResponse::failure(&e);
            }
        };

        let action = command.action();
        let outcome = execute(self, command).await;
        respond(action, outcome)
    }
}

fn to_result<T: Serialize>(value: &T) -> Result<Option<Value>, BridgeError> {
    serde_json::to_value(value)
        .map(Some)
        .map_err(|e| BridgeError::Operation(format!("Failed to serialize result: {}", e)))
}

fn respond(action: &str, outcome: Result<Option<Value>, BridgeError>) -> CommandResponse {
    if let Err(e) = &outcome {
        warn!("Bridge command {} failed ({:?}): {}", action, e.kind(), e);
    }
    CommandResponse::from(outcome)
}
