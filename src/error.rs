//! Configuration error types
//!
//! The simulation itself never fails; only loading a config document can.

use std::fmt;

/// Errors produced while parsing or validating a [`crate::GameConfig`]
#[derive(Debug)]
pub enum ConfigError {
    /// The document was not valid JSON or did not match the schema
    Parse(serde_json::Error),

    /// A numeric tunable is outside its usable range
    OutOfRange {
        /// Name of the field (for logging)
        name: &'static str,
        /// The value that was rejected
        value: f64,
        /// Human-readable description of the accepted range
        expected: &'static str,
    },

    /// A `[min, max)` range has `max <= min`
    EmptyRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid config document: {}", e),
            ConfigError::OutOfRange {
                name,
                value,
                expected,
            } => write!(f, "{} = {} is out of range (expected {})", name, value, expected),
            ConfigError::EmptyRange { name, min, max } => {
                write!(f, "{} range [{}, {}) is empty", name, min, max)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
