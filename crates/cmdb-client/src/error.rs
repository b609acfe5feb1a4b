//! Error types for REST resource calls
//!
//! A 204 response is not an error: the decoding step turns it into `None`
//! or an empty list. Everything else that is not a 2xx surfaces here.

use thiserror::Error;

/// Resource client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// Authentication failed.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Invalid response from the API.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Input rejected before any request was sent.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Request body could not be encoded.
    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type for resource calls.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// HTTP status of the failed response, if one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::AuthenticationFailed => Some(401),
            ClientError::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

/// Input validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Search pattern is empty after trimming.
    #[error("Search pattern is empty")]
    EmptyPattern,

    /// Name cannot stand as a single path segment.
    #[error("Invalid name: {0:?}")]
    InvalidName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let err = ClientError::Api {
            status: 404,
            message: "Not found".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(ClientError::AuthenticationFailed.status_code(), Some(401));
        assert_eq!(ClientError::from(ValidationError::EmptyPattern).status_code(), None);
    }

    #[test]
    fn test_error_messages() {
        let err = ClientError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error (500): boom");
        assert_eq!(
            ClientError::from(ValidationError::EmptyPattern).to_string(),
            "Validation failed: Search pattern is empty"
        );
    }
}
