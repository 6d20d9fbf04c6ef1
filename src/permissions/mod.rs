//! Capture permission negotiation
//!
//! - `types`: tri-state constraint/permission values and their wire form
//! - `oracle`: the platform permission authority seam
//! - `negotiator`: query & request policy

mod negotiator;
mod oracle;
mod types;

pub use negotiator::PermissionNegotiator;
pub use oracle::{AuthorizationStatus, PermissionOracle, StaticPermissionOracle};
pub use types::{ConstraintValue, MediaConstraint, MediaKind, PermissionState, PermissionValue};
