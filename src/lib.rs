pub mod bridge;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod http;
pub mod payload;
pub mod permissions;
pub mod session;

pub use bridge::{dispatch, BridgeCommand, CommandResponse};
pub use config::Config;
pub use controller::SessionController;
pub use error::{BridgeError, ErrorKind, ErrorPayload};
pub use events::{BridgeEvent, ChannelEmitter, Emitter};
pub use http::{create_router, AppState};
pub use permissions::{
    AuthorizationStatus, ConstraintValue, MediaConstraint, MediaKind, PermissionNegotiator,
    PermissionOracle, PermissionState, PermissionValue, StaticPermissionOracle,
};
pub use session::{
    AudioDevice, ControllerState, ControllerStatus, DeviceSelector, JoinConfigParser,
    JsonJoinConfigParser, MediaDevice, MeetingBackend, MeetingBackendFactory, SessionConfig,
    SimulatedBackendFactory,
};
