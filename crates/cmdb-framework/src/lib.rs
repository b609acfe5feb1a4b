//! # CMDB Framework
//!
//! Domain models shared by the CMDB client crates.
//!
//! ## Overview
//!
//! - **Types**: Object schemas with fields, sections and summaries
//! - **Categories**: Navigation groups of types and the category tree
//! - **Objects**: Configuration items holding field values
//! - **Files**: Elements of the media store
//! - **Render**: Typed fields and sections for form rendering
//!
//! ## Architecture
//!
//! ```text
//! CmdbCategory ──> CmdbType ──> CmdbObject
//!                     │
//!                     └─ fields + render_meta.sections ──> RenderForm
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use cmdb_framework::render::{Field, FieldKind, RenderForm, Section};
//!
//! let form = RenderForm::new(
//!     vec![Section::new("general", "General", ["hostname"])],
//!     vec![Field::new("hostname", "Hostname", FieldKind::Text).required()],
//! )
//! .unwrap();
//!
//! assert!(form.field("hostname").unwrap().required);
//! ```

pub mod category;
pub mod file;
pub mod object;
pub mod render;
pub mod types;

// Re-export main types for convenience
pub use category::{CategoryMeta, CategoryNode, CmdbCategory, CmdbCategoryTree};
pub use file::FileElement;
pub use object::{CmdbObject, ObjectField};
pub use render::{Field, FieldKind, FieldOption, RenderError, RenderForm, Section};
pub use types::{CmdbType, ExternalLink, TypeRenderMeta, TypeSummary};
