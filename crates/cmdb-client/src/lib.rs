//! # CMDB Client
//!
//! REST clients for the CMDB backend.
//!
//! ## Overview
//!
//! The cmdb-client crate handles:
//! - **Configuration**: Endpoint, token and timeouts from the environment
//! - **Transport**: Sending requests and decoding responses
//! - **Resources**: One generic client for every entity collection
//! - **Clients**: Category, type, object and file clients
//! - **Views**: Fetches tied to the lifetime of the view that started them
//!
//! ## Empty results
//!
//! The backend answers 204 No Content when there is nothing to return. This
//! is never an error: single-entity reads yield `None` and collection reads
//! yield an empty list.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cmdb_client::{ClientConfig, CmdbClient};
//!
//! async fn example() -> cmdb_client::ClientResult<()> {
//!     let config = ClientConfig::from_env();
//!     let client = CmdbClient::new(&config)?;
//!
//!     // None when the backend has no such category
//!     if let Some(category) = client.categories().get_by_id(4).await? {
//!         println!("{}", category.label);
//!     }
//!
//!     // Regex search; invalid patterns are escaped first
//!     let servers = client.types().search("server").await?;
//!     println!("{} matching types", servers.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Permission-gated views
//!
//! Views implement [`cmdb_rights::ViewContainer`], so a
//! [`cmdb_rights::PermissionGate`] decides whether they mount and start
//! fetching:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cmdb_client::{ClientConfig, HttpTransport, ObjectClient, SidebarTypeEntry};
//! use cmdb_framework::CmdbType;
//! use cmdb_rights::{PermissionGate, RightSet, SessionRights};
//!
//! async fn example(ty: CmdbType) -> cmdb_client::ClientResult<()> {
//!     let transport = Arc::new(HttpTransport::new(&ClientConfig::from_env())?);
//!     let entry = SidebarTypeEntry::new(ty, ObjectClient::new(transport));
//!
//!     let session = SessionRights::new("admin", RightSet::from_strings(&["base.*"]));
//!     let mut gate = PermissionGate::new(session, entry);
//!     gate.set_required_rights(Some("base.framework.object.view".into()));
//!     Ok(())
//! }
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod resource;
pub mod transport;
pub mod validator;
pub mod views;

// Re-export main types
pub use clients::{CategoryClient, CmdbClient, FileClient, ObjectClient, TypeClient};
pub use config::{ApiEndpoint, ClientConfig, ConfigError};
pub use error::{ClientError, ClientResult, ValidationError};
pub use resource::{ApiResource, ResourceClient};
pub use transport::{ApiRequest, ApiResponse, ApiTransport, HttpTransport};
pub use views::{SidebarTypeEntry, ViewScope};
