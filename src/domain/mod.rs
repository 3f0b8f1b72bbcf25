//! Domain layer containing the settings model.
//!
//! This module contains:
//! - The ordered dotted-key settings document
//! - Time values with units (clock periods, delays)
//! - The error type shared by schema binding and validation
//! - Logger with rotation

pub mod document;
mod error;
pub mod logger;
mod time;

pub use document::FlowDocument;
pub use error::FlowError;
pub use self::time::TimeValue;

#[allow(unused)]
pub use self::time::TimeUnit;
