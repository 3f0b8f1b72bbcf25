//! Error types for flowcfg.

use thiserror::Error;

/// Main error type for flowcfg.
///
/// Schema and validation errors carry the dotted key path of the offending
/// setting, e.g. `vlsi.inputs.delays[0].clock`.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Required field is absent
    #[error("{key}: missing required field")]
    MissingField { key: String },

    /// Value has the wrong type for its field
    #[error("{key}: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Value is not a member of a closed enum set
    #[error("{key}: unknown value '{value}' (expected one of: {allowed})")]
    UnknownEnumValue {
        key: String,
        value: String,
        allowed: String,
    },

    /// Delay constraint references a clock that was never declared
    #[error("{key}: references undeclared clock '{clock}'")]
    DanglingReference { key: String, clock: String },

    /// Value is well-typed but semantically invalid
    #[error("{key}: {reason}")]
    InvalidValue { key: String, reason: String },

    /// TOML syntax error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// JSON syntax error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Regex error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl FlowError {
    /// Shorthand for a `MissingField` at the given key path.
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingField { key: key.into() }
    }

    /// Shorthand for an `InvalidValue` at the given key path.
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
