//! Generic REST resource client.
//!
//! One client type serves every entity collection of the backend. The
//! collection is named by a path prefix:
//!
//! ```text
//! GET    /<prefix>/<id>          get_by_id
//! GET    /<prefix>/<name>        get_by_name
//! GET    /<prefix>/find/<regex>  search
//! GET    /<prefix>/[?order=..]   list
//! POST   /<prefix>/              create
//! PUT    /<prefix>/              update
//! DELETE /<prefix>/<id>          delete
//! ```
//!
//! Every call is a single round trip with no retry and no caching.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, instrument};

use cmdb_framework::{CmdbCategory, CmdbObject, CmdbType, FileElement};

use crate::error::{ClientError, ClientResult};
use crate::transport::{ApiRequest, ApiTransport, HttpTransport};
use crate::validator;

/// An entity served under a fixed path prefix.
pub trait ApiResource: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Path prefix of the collection.
    const PREFIX: &'static str;
}

impl ApiResource for CmdbType {
    const PREFIX: &'static str = "type";
}

impl ApiResource for CmdbCategory {
    const PREFIX: &'static str = "category";
}

impl ApiResource for CmdbObject {
    const PREFIX: &'static str = "object";
}

impl ApiResource for FileElement {
    const PREFIX: &'static str = "media_file";
}

/// Client for one entity collection.
pub struct ResourceClient<T, X = HttpTransport> {
    /// Shared transport.
    transport: Arc<X>,

    /// Path prefix of the collection.
    prefix: Cow<'static, str>,

    _entity: PhantomData<fn() -> T>,
}

impl<T, X> Clone for ResourceClient<T, X> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            prefix: self.prefix.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T, X> fmt::Debug for ResourceClient<T, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl<T, X> ResourceClient<T, X> {
    /// The collection path prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The shared transport.
    pub fn transport(&self) -> &Arc<X> {
        &self.transport
    }

    /// Build a request below this collection.
    pub(crate) fn request<I, S>(&self, method: Method, segments: I) -> ApiRequest
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut path = vec![self.prefix.to_string()];
        path.extend(segments.into_iter().map(Into::into));
        ApiRequest::new(method, path)
    }
}

impl<T, X> ResourceClient<T, X>
where
    T: ApiResource,
    X: ApiTransport,
{
    /// Create a client for `T` under its default prefix.
    pub fn new(transport: Arc<X>) -> Self {
        Self::with_prefix(transport, T::PREFIX)
    }

    /// Create a client for `T` under a custom prefix.
    pub fn with_prefix(transport: Arc<X>, prefix: impl Into<Cow<'static, str>>) -> Self {
        Self {
            transport,
            prefix: prefix.into(),
            _entity: PhantomData,
        }
    }

    /// Get an entity by public id. `None` if the backend has no content.
    #[instrument(skip(self), fields(prefix = %self.prefix))]
    pub async fn get_by_id(&self, public_id: u64) -> ClientResult<Option<T>> {
        debug!("Fetching {} {}", self.prefix, public_id);

        let request = self.request(Method::GET, [public_id.to_string()]);
        self.transport.send(request).await?.into_optional()
    }

    /// Get an entity by its unique name. `None` if the backend has no content.
    ///
    /// Names that cannot be a single path segment are rejected unsent.
    #[instrument(skip(self), fields(prefix = %self.prefix))]
    pub async fn get_by_name(&self, name: &str) -> ClientResult<Option<T>> {
        debug!("Fetching {} named {}", self.prefix, name);

        let request = self.request(Method::GET, [validator::path_name(name)?]);
        self.transport.send(request).await?.into_optional()
    }

    /// Find entities whose name or label matches a regular expression.
    ///
    /// The pattern is validated before any request is sent.
    #[instrument(skip(self), fields(prefix = %self.prefix))]
    pub async fn search(&self, pattern: &str) -> ClientResult<Vec<T>> {
        let pattern = validator::search_pattern(pattern)?;
        debug!("Searching {} for {}", self.prefix, pattern);

        let request = self.request(Method::GET, ["find".to_string(), pattern]);
        self.transport.send(request).await?.into_list()
    }

    /// List all entities, optionally ordered by a backend sort key.
    #[instrument(skip(self), fields(prefix = %self.prefix))]
    pub async fn list(&self, order: Option<&str>) -> ClientResult<Vec<T>> {
        debug!("Listing {}", self.prefix);

        let mut request = self
            .request(Method::GET, std::iter::empty::<String>())
            .with_trailing_slash();
        if let Some(order) = order {
            request = request.with_query("order", order);
        }
        self.transport.send(request).await?.into_list()
    }

    /// Create an entity. Returns the stored representation with its id.
    #[instrument(skip(self, entity), fields(prefix = %self.prefix))]
    pub async fn create(&self, entity: &T) -> ClientResult<T> {
        debug!("Creating {}", self.prefix);

        let request = self
            .request(Method::POST, std::iter::empty::<String>())
            .with_trailing_slash()
            .with_body(Self::encode(entity)?);
        self.transport.send(request).await?.into_body()
    }

    /// Update an entity. Returns the stored representation.
    #[instrument(skip(self, entity), fields(prefix = %self.prefix))]
    pub async fn update(&self, entity: &T) -> ClientResult<T> {
        debug!("Updating {}", self.prefix);

        let request = self
            .request(Method::PUT, std::iter::empty::<String>())
            .with_trailing_slash()
            .with_body(Self::encode(entity)?);
        self.transport.send(request).await?.into_body()
    }

    /// Delete an entity. Returns the deleted id.
    #[instrument(skip(self), fields(prefix = %self.prefix))]
    pub async fn delete(&self, public_id: u64) -> ClientResult<u64> {
        debug!("Deleting {} {}", self.prefix, public_id);

        let request = self.request(Method::DELETE, [public_id.to_string()]);
        let confirmed = self.transport.send(request).await?.into_optional::<u64>()?;
        Ok(confirmed.unwrap_or(public_id))
    }

    fn encode(entity: &T) -> ClientResult<serde_json::Value> {
        serde_json::to_value(entity).map_err(|e| ClientError::InvalidRequest(e.to_string()))
    }
}
