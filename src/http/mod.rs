//! HTTP transport for the web content layer
//!
//! This module exposes the bridge over a small REST surface:
//! - POST /bridge/command - Run a `{ action, payload }` command
//! - GET /bridge/status - Controller state snapshot
//! - GET /bridge/events - Server-Sent Events stream of session events
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
