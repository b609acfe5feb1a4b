//! Error types for right checks.

use thiserror::Error;

/// Right check error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RightsError {
    /// The session holds neither the right nor a wildcard covering it
    #[error("Forbidden: missing right {right}")]
    Forbidden {
        /// The right that was required.
        right: String,
    },

    /// The right name is not a dot-separated path
    #[error("Invalid right name: {0}")]
    InvalidRightName(String),
}

/// Result type for right checks.
pub type RightsResult<T> = Result<T, RightsError>;

impl RightsError {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            RightsError::Forbidden { .. } => 403,
            RightsError::InvalidRightName(_) => 400,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            RightsError::Forbidden { .. } => "FORBIDDEN",
            RightsError::InvalidRightName(_) => "INVALID_RIGHT_NAME",
        }
    }
}
