//! Category client.
//!
//! Category CRUD through the generic resource client, plus the category tree
//! and the "name already taken" check used by category forms.

use reqwest::Method;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

use cmdb_framework::{CmdbCategory, CmdbCategoryTree};

use crate::error::ClientResult;
use crate::resource::ResourceClient;
use crate::transport::{ApiTransport, HttpTransport};

/// Delay before a name check is sent, so typing does not flood the backend.
pub const DEFAULT_EXISTS_DEBOUNCE: Duration = Duration::from_millis(500);

/// Category client.
pub struct CategoryClient<X = HttpTransport> {
    resource: ResourceClient<CmdbCategory, X>,
}

impl<X: ApiTransport> CategoryClient<X> {
    /// Create a category client on a shared transport.
    pub fn new(transport: Arc<X>) -> Self {
        Self {
            resource: ResourceClient::new(transport),
        }
    }

    /// Get the category tree with nested children and their types.
    ///
    /// `None` if there are no categories.
    #[instrument(skip(self))]
    pub async fn tree(&self) -> ClientResult<Option<CmdbCategoryTree>> {
        debug!("Fetching category tree");

        let request = self
            .resource
            .request(Method::GET, ["tree"])
            .with_trailing_slash();
        self.resource.transport().send(request).await?.into_optional()
    }

    /// Check if a category with this name exists, after waiting `debounce`.
    ///
    /// Never fails: no content, error responses and transport failures all
    /// count as "does not exist".
    #[instrument(skip(self))]
    pub async fn category_exists(&self, name: &str, debounce: Duration) -> bool {
        if !debounce.is_zero() {
            tokio::time::sleep(debounce).await;
        }

        match self.resource.get_by_name(name).await {
            Ok(found) => found.is_some(),
            Err(e) => {
                debug!(error = %e, "Category name check failed, treating as free");
                false
            }
        }
    }
}

impl<X> Clone for CategoryClient<X> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

impl<X> std::fmt::Debug for CategoryClient<X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryClient")
            .field("prefix", &self.resource.prefix())
            .finish()
    }
}

impl<X> Deref for CategoryClient<X> {
    type Target = ResourceClient<CmdbCategory, X>;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}
