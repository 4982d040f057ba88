//! Error types for the engine's fallible surfaces.
//!
//! The simulation tick itself never fails; only configuration loading and
//! validation can.

use std::fmt;

/// Errors raised while loading or validating an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug)]
pub enum EngineError {
    /// The configuration JSON could not be parsed.
    ConfigParse(serde_json::Error),
    /// A configuration value is outside its legal domain.
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
}

impl EngineError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::ConfigParse(e) => write!(f, "Failed to parse engine config: {}", e),
            EngineError::InvalidParameter { name, reason } => {
                write!(f, "Invalid config value `{}`: {}", name, reason)
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::ConfigParse(e)
    }
}
