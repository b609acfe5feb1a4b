//! Resource clients for the CMDB backend.
//!
//! - Categories: CRUD, the category tree and name checks
//! - Types: CRUD
//! - Objects: CRUD and per-type counts
//! - Files: CRUD on media store elements
//!
//! All clients of one [`CmdbClient`] share a single transport.

pub mod category;
pub mod object;

use std::sync::Arc;

use cmdb_framework::{CmdbType, FileElement};

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::resource::ResourceClient;
use crate::transport::{ApiTransport, HttpTransport};

pub use category::{CategoryClient, DEFAULT_EXISTS_DEBOUNCE};
pub use object::ObjectClient;

/// Type client.
pub type TypeClient<X = HttpTransport> = ResourceClient<CmdbType, X>;

/// Media file client.
pub type FileClient<X = HttpTransport> = ResourceClient<FileElement, X>;

/// Entry point bundling every resource client.
///
/// # Example
///
/// ```rust,no_run
/// use cmdb_client::{ClientConfig, CmdbClient};
///
/// async fn example() -> cmdb_client::ClientResult<()> {
///     let client = CmdbClient::new(&ClientConfig::from_env())?;
///     let types = client.types().list(Some("name")).await?;
///     println!("{} types", types.len());
///     Ok(())
/// }
/// ```
pub struct CmdbClient<X = HttpTransport> {
    categories: CategoryClient<X>,
    types: TypeClient<X>,
    objects: ObjectClient<X>,
    files: FileClient<X>,
}

impl CmdbClient<HttpTransport> {
    /// Create clients talking HTTP to the configured endpoint.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }
}

impl<X: ApiTransport> CmdbClient<X> {
    /// Create clients on an existing transport.
    pub fn with_transport(transport: Arc<X>) -> Self {
        Self {
            categories: CategoryClient::new(Arc::clone(&transport)),
            types: ResourceClient::new(Arc::clone(&transport)),
            objects: ObjectClient::new(Arc::clone(&transport)),
            files: ResourceClient::new(transport),
        }
    }

    /// Category client.
    pub fn categories(&self) -> &CategoryClient<X> {
        &self.categories
    }

    /// Type client.
    pub fn types(&self) -> &TypeClient<X> {
        &self.types
    }

    /// Object client.
    pub fn objects(&self) -> &ObjectClient<X> {
        &self.objects
    }

    /// Media file client.
    pub fn files(&self) -> &FileClient<X> {
        &self.files
    }
}

impl<X> Clone for CmdbClient<X> {
    fn clone(&self) -> Self {
        Self {
            categories: self.categories.clone(),
            types: self.types.clone(),
            objects: self.objects.clone(),
            files: self.files.clone(),
        }
    }
}
