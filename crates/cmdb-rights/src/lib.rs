//! # CMDB Rights
//!
//! This crate decides what a signed-in user may see in the CMDB client.
//!
//! ## Overview
//!
//! The cmdb-rights crate handles:
//! - **Rights**: Dot-separated right names such as `base.framework.object.view`
//! - **Right Sets**: The rights granted to a session, including wildcards
//! - **Capability Lookup**: Direct and extended right checks
//! - **Permission Gate**: Mount/clear decisions for permission-gated views
//!
//! ## Right Names
//!
//! ```text
//! base.framework.object.view     - View objects
//! base.framework.type.edit       - Edit types
//! base.framework.*               - Everything under base.framework
//! base.*                         - Administrator, everything under base
//! ```
//!
//! A right held verbatim is a **direct** grant. A right covered by a held
//! wildcard is an **extended** grant.
//!
//! ## Usage
//!
//! ```rust
//! use cmdb_rights::{evaluate, RightRequirement, RightSet};
//!
//! let rights = RightSet::from_strings(&["base.framework.object.view", "base.export.*"]);
//!
//! // Direct grant
//! assert!(evaluate(&RightRequirement::from("base.framework.object.view"), &rights));
//!
//! // Extended grant through base.export.*
//! assert!(evaluate(&RightRequirement::from("base.export.object.csv"), &rights));
//!
//! // Any of several rights
//! let req = RightRequirement::from(vec!["base.framework.type.edit", "base.export.type"]);
//! assert!(evaluate(&req, &rights));
//! ```

pub mod error;
pub mod gate;
pub mod lookup;
pub mod rights;

// Re-export main types for convenience
pub use error::{RightsError, RightsResult};
pub use gate::{evaluate, require_right, GateDecision, PermissionGate, RightRequirement, ViewContainer};
pub use lookup::{CapabilityLookup, SessionRights};
pub use rights::{Right, RightSet};
