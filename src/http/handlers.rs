use super::state::AppState;
use crate::bridge::{self, CommandResponse};
use crate::error::ErrorKind;
use crate::session::ControllerStatus;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Json,
    },
};
use futures::stream::{Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, error, warn};

// ============================================================================
// Handlers
// ============================================================================

/// POST /bridge/command
/// Run one bridge command
pub async fn command(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let response = bridge::dispatch(&state.controller, &body).await;
    (status_code(&response), Json(response))
}

/// GET /bridge/status
/// Get the controller's current state
pub async fn status(State(state): State<AppState>) -> Json<ControllerStatus> {
    let controller = state.controller.lock().await;
    Json(controller.status())
}

/// GET /bridge/events
/// Stream session events to the web layer
pub async fn events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.events.subscribe()).filter_map(|item| async move {
        match item {
            Ok(event) => match Event::default().json_data(&event) {
                Ok(sse_event) => Some(Ok::<_, Infallible>(sse_event)),
                Err(e) => {
                    error!("Failed to serialize event: {}", e);
                    None
                }
            },
            Err(e) => {
                // Subscriber fell behind; skip what was lost
                warn!("Event stream lagged: {}", e);
                None
            }
        }
    });

    debug!("Event subscriber connected");

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn status_code(response: &CommandResponse) -> StatusCode {
    match response.error.as_ref().map(|e| e.kind) {
        None => StatusCode::OK,
        Some(ErrorKind::ParseError) => StatusCode::BAD_REQUEST,
        Some(ErrorKind::StateError) => StatusCode::CONFLICT,
        Some(ErrorKind::OperationFailure) => StatusCode::INTERNAL_SERVER_ERROR,
        Some(ErrorKind::NotImplementedError) => StatusCode::NOT_IMPLEMENTED,
    }
}
