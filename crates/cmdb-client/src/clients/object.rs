//! Object client.

use reqwest::Method;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, instrument};

use cmdb_framework::CmdbObject;

use crate::error::ClientResult;
use crate::resource::ResourceClient;
use crate::transport::{ApiTransport, HttpTransport};

/// Object client.
pub struct ObjectClient<X = HttpTransport> {
    resource: ResourceClient<CmdbObject, X>,
}

impl<X: ApiTransport> ObjectClient<X> {
    /// Create an object client on a shared transport.
    pub fn new(transport: Arc<X>) -> Self {
        Self {
            resource: ResourceClient::new(transport),
        }
    }

    /// Count the objects of a type. No content counts as zero.
    #[instrument(skip(self))]
    pub async fn count_by_type(&self, type_id: u64) -> ClientResult<u64> {
        debug!("Counting objects of type {}", type_id);

        let request = self
            .resource
            .request(Method::GET, ["count".to_string(), type_id.to_string()]);
        let count = self.resource.transport().send(request).await?.into_optional()?;
        Ok(count.unwrap_or(0))
    }
}

impl<X> Clone for ObjectClient<X> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

impl<X> std::fmt::Debug for ObjectClient<X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectClient")
            .field("prefix", &self.resource.prefix())
            .finish()
    }
}

impl<X> Deref for ObjectClient<X> {
    type Target = ResourceClient<CmdbObject, X>;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}
