//! Client configuration.
//!
//! Provides the backend endpoint, authentication token and timeout settings.
//! Configuration is loaded from environment variables with defaults for
//! local development.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::validator;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required environment variable.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// REST API endpoint.
    pub api: ApiEndpoint,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Whether to verify TLS certificates (disable only for testing).
    pub verify_tls: bool,
}

impl Default for ClientConfig {
    /// Returns default configuration suitable for local development.
    fn default() -> Self {
        Self {
            api: ApiEndpoint {
                base_url: "http://localhost:4000/rest".to_string(),
                token: None,
            },
            timeout_secs: 30,
            verify_tls: true,
        }
    }
}

impl ClientConfig {
    /// Configuration for a base URL with defaults for everything else.
    pub fn for_url(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiEndpoint {
                base_url: base_url.into(),
                token: None,
            },
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CMDB_API_URL`: REST API base URL (default: http://localhost:4000/rest)
    /// - `CMDB_API_TOKEN`: Bearer token of the signed-in user
    /// - `CMDB_TIMEOUT_SECS`: Request timeout in seconds (default: 30)
    /// - `CMDB_VERIFY_TLS`: Whether to verify TLS (default: true)
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            api: ApiEndpoint {
                base_url: std::env::var("CMDB_API_URL").unwrap_or(default.api.base_url),
                token: std::env::var("CMDB_API_TOKEN").ok(),
            },
            timeout_secs: std::env::var("CMDB_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.timeout_secs),
            verify_tls: std::env::var("CMDB_VERIFY_TLS")
                .map(|s| s != "false" && s != "0")
                .unwrap_or(default.verify_tls),
        }
    }

    /// Attach a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api.token = Some(token.into());
        self
    }

    /// Get the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate that the configuration is fit for production.
    ///
    /// Production requires a token and an https endpoint.
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        if self.api.token.is_none() {
            return Err(ConfigError::MissingEnvVar("CMDB_API_TOKEN".to_string()));
        }
        let url = Url::parse(&self.api.base_url).map_err(|e| ConfigError::InvalidValue {
            key: "CMDB_API_URL".to_string(),
            message: e.to_string(),
        })?;
        if url.scheme() != "https" {
            return Err(ConfigError::InvalidValue {
                key: "CMDB_API_URL".to_string(),
                message: "production endpoints must use https".to_string(),
            });
        }
        if !self.verify_tls {
            return Err(ConfigError::InvalidValue {
                key: "CMDB_VERIFY_TLS".to_string(),
                message: "TLS verification cannot be disabled in production".to_string(),
            });
        }
        Ok(())
    }
}

/// The REST API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEndpoint {
    /// Base URL of the REST API (e.g., "https://cmdb.example.com/rest").
    pub base_url: String,

    /// Bearer token for the signed-in user.
    pub token: Option<String>,
}

impl ApiEndpoint {
    /// Build a request URL below the base URL.
    ///
    /// Each segment is percent-encoded once as a single path segment, so a
    /// `/` inside a segment never creates a new path level. With
    /// `trailing_slash` the path ends in `/`. Empty, `.` and `..` segments
    /// are refused, since URL normalization would drop them.
    pub fn resolve<S: AsRef<str>>(&self, segments: &[S], trailing_slash: bool) -> ClientResult<Url> {
        if let Some(segment) = segments
            .iter()
            .map(|segment| AsRef::<str>::as_ref(segment))
            .find(|segment| segment.is_empty() || validator::is_dot_segment(segment))
        {
            return Err(ClientError::InvalidUrl(format!("{:?} is not a path segment", segment)));
        }

        let mut url = Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base URL", self.base_url)))?;
            path.pop_if_empty();
            path.extend(segments.iter().map(AsRef::as_ref));
            if trailing_slash {
                path.push("");
            }
        }

        Ok(url)
    }

    /// Check if token authentication is available.
    pub fn has_auth(&self) -> bool {
        self.token.is_some()
    }
}
