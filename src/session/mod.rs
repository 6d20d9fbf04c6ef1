//! Meeting session management
//!
//! This module provides the pieces the controller builds a session from:
//! - Join payload parsing into a `SessionConfig`
//! - The `MeetingBackend` seam over the conferencing engine
//! - Audio device projection and selection payloads
//! - Controller state and status snapshots

mod backend;
mod config;
mod devices;
mod simulated;
mod stats;

pub use backend::{MediaDevice, MeetingBackend, MeetingBackendFactory};
pub use config::{JoinConfigParser, JsonJoinConfigParser, SessionConfig};
pub use devices::{project, AudioDevice, AudioDeviceKind, DeviceSelector, DEFAULT_GROUP_ID};
pub use simulated::{SimulatedBackend, SimulatedBackendFactory};
pub use stats::{ControllerState, ControllerStatus};
