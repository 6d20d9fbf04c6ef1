//! Web-layer command protocol
//!
//! Decodes `{ action, payload }` envelopes, routes them to the controller
//! and wraps the outcome in a `{ ok, result?, error? }` response.

mod commands;
mod dispatch;

pub use commands::{payload_bytes, BridgeCommand, CommandResponse};
pub use dispatch::{dispatch, execute};
