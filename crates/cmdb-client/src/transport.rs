//! HTTP transport and response decoding.
//!
//! Requests are described by [`ApiRequest`] and sent through an
//! [`ApiTransport`]. Every response comes back as an [`ApiResponse`], which is
//! decoded in one explicit step:
//!
//! | Decoder | 204 No Content | other 2xx | 401 | other |
//! |---------|----------------|-----------|-----|-------|
//! | [`ApiResponse::into_optional`] | `None` | `Some(body)` | `AuthenticationFailed` | `Api` |
//! | [`ApiResponse::into_list`] | `[]` | `body` | `AuthenticationFailed` | `Api` |
//! | [`ApiResponse::into_body`] | `InvalidResponse` | `body` | `AuthenticationFailed` | `Api` |

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument, warn};

use crate::config::{ApiEndpoint, ClientConfig};
use crate::error::{ClientError, ClientResult};

/// HTTP 204, the backend's empty-result sentinel.
pub const NO_CONTENT: u16 = 204;

/// A request below the API base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,

    /// Unencoded path segments.
    pub segments: Vec<String>,

    /// Whether the path ends in `/`.
    pub trailing_slash: bool,

    /// Query parameters.
    pub query: Vec<(String, String)>,

    /// JSON body.
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Create a request without query or body.
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            trailing_slash: false,
            query: Vec::new(),
            body: None,
        }
    }

    /// End the path in `/`.
    pub fn with_trailing_slash(mut self) -> Self {
        self.trailing_slash = true;
        self
    }

    /// Add a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// The unencoded path, for logging.
    pub fn display_path(&self) -> String {
        let mut path = format!("/{}", self.segments.join("/"));
        if self.trailing_slash {
            path.push('/');
        }
        path
    }
}

/// A raw response: status and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,

    /// Response body.
    pub body: String,
}

impl ApiResponse {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check if the response is the 204 sentinel.
    pub fn is_no_content(&self) -> bool {
        self.status == NO_CONTENT
    }

    /// Decode a single entity; 204 becomes `None`.
    pub fn into_optional<T: DeserializeOwned>(self) -> ClientResult<Option<T>> {
        self.check_status()?;
        if self.is_no_content() {
            return Ok(None);
        }
        self.parse().map(Some)
    }

    /// Decode a collection; 204 becomes an empty list.
    pub fn into_list<T: DeserializeOwned>(self) -> ClientResult<Vec<T>> {
        self.check_status()?;
        if self.is_no_content() {
            return Ok(Vec::new());
        }
        self.parse()
    }

    /// Decode a body that must be present.
    pub fn into_body<T: DeserializeOwned>(self) -> ClientResult<T> {
        self.check_status()?;
        if self.is_no_content() {
            return Err(ClientError::InvalidResponse("expected a body, got no content".to_string()));
        }
        self.parse()
    }

    fn check_status(&self) -> ClientResult<()> {
        if self.status == 401 {
            error!("CMDB authentication failed");
            return Err(ClientError::AuthenticationFailed);
        }

        if !(200..300).contains(&self.status) {
            let message = if self.body.is_empty() {
                "Unknown error".to_string()
            } else {
                self.body.clone()
            };
            warn!("CMDB API error ({}): {}", self.status, message);
            return Err(ClientError::Api {
                status: self.status,
                message,
            });
        }

        Ok(())
    }

    fn parse<T: DeserializeOwned>(&self) -> ClientResult<T> {
        serde_json::from_str(&self.body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

/// Sends API requests.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Send a request and return the raw response.
    ///
    /// Only failures to get any response are errors here; status handling
    /// belongs to the decoding step.
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP client instance.
    client: Client,

    /// API endpoint configuration.
    endpoint: ApiEndpoint,
}

impl HttpTransport {
    /// Create a transport from client configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.api.clone(),
        })
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.display_path()))]
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let mut url = self.endpoint.resolve(&request.segments, request.trailing_slash)?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }

        debug!("Sending CMDB request to {}", url);

        let mut builder = self.client.request(request.method, url);
        if let Some(ref token) = self.endpoint.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body {
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, "CMDB response received");
        Ok(ApiResponse { status, body })
    }
}
