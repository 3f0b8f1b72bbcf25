//! Configuration management module.
//!
//! Handles TOML flow-configuration loading, schema binding, validation, and
//! default generation.

mod schema;
mod service;
mod types;
mod validation;

pub use types::FlowConfig;

// Re-export for use in other modules
pub use service::ConfigService;
#[allow(unused_imports)]
pub(crate) use types::{ClockConstraint, DelayConstraint, PinAssignment, PlacementConstraint};
pub use validation::validate;
