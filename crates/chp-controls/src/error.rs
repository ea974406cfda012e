//! Error types for control kernel operations.

use chp_core::CoreError;
use thiserror::Error;

/// Result type for control kernel operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur in control kernel operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Three-day temperature log has the wrong keys or sample counts.
    #[error("Invalid log structure: {what}")]
    InvalidStructure { what: String },

    /// Heating-curve power operation is undefined over the reals.
    #[error("Domain error: ({base})^{exponent} is undefined ({what})")]
    Domain {
        what: &'static str,
        base: f64,
        exponent: f64,
    },

    /// Out-of-range gains, limits or curve parameters.
    #[error("Configuration error: {what}")]
    Configuration { what: &'static str },
}

/// Invalid configuration values surface as configuration errors.
impl From<CoreError> for ControlError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NonFinite { what, .. } | CoreError::InvalidArg { what } => {
                ControlError::Configuration { what }
            }
        }
    }
}
