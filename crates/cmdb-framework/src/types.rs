//! Type domain models
//!
//! A type describes the shape of the objects created from it: its fields,
//! how they are grouped into sections, and how objects are summarized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::render::{Field, RenderError, RenderForm, Section};

/// An object type.
///
/// # Examples
///
/// ```
/// use cmdb_framework::CmdbType;
///
/// let blank = CmdbType::new();
/// assert_eq!(blank.public_id, 0);
/// assert!(blank.active);
/// assert!(blank.fields.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CmdbType {
    /// Server-assigned id, 0 until created
    #[serde(default)]
    pub public_id: u64,

    /// Unique machine name
    pub name: String,

    /// Human-readable label
    #[serde(default)]
    pub label: String,

    /// Description shown in the type list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Id of the user who created the type
    #[serde(default)]
    pub author_id: u64,

    /// Whether objects of this type can be created
    #[serde(default = "default_active")]
    pub active: bool,

    /// Schema version
    #[serde(default = "default_version")]
    pub version: String,

    /// When the type was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,

    /// Layout information
    #[serde(default)]
    pub render_meta: TypeRenderMeta,

    /// Field definitions
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// Layout information of a type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TypeRenderMeta {
    /// Icon class shown next to the type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Field sections
    #[serde(default)]
    pub sections: Vec<Section>,

    /// Fields used to summarize an object in lists
    #[serde(default)]
    pub summary: TypeSummary,

    /// Links to external systems
    #[serde(default)]
    pub externals: Vec<ExternalLink>,
}

/// Fields used to summarize an object.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeSummary {
    /// Field names in summary order
    #[serde(default)]
    pub fields: Vec<String>,
}

/// A link from an object to an external system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExternalLink {
    /// Unique link name
    pub name: String,

    /// Displayed label
    pub label: String,

    /// URL template with `{}` placeholders
    pub href: String,

    /// Field names filling the placeholders
    #[serde(default)]
    pub fields: Vec<String>,
}

impl CmdbType {
    /// A blank type, as used by the "add type" form.
    pub fn new() -> Self {
        Self {
            public_id: 0,
            name: String::new(),
            label: String::new(),
            description: None,
            author_id: 0,
            active: default_active(),
            version: default_version(),
            creation_time: None,
            render_meta: TypeRenderMeta::default(),
            fields: Vec::new(),
        }
    }

    /// Label if set, otherwise the name.
    pub fn display_name(&self) -> &str {
        if self.label.is_empty() {
            &self.name
        } else {
            &self.label
        }
    }

    /// Build the render form for this type's sections and fields.
    pub fn render_form(&self) -> Result<RenderForm, RenderError> {
        RenderForm::new(self.render_meta.sections.clone(), self.fields.clone())
    }

    /// Check if the type has been stored on the server.
    pub fn is_persisted(&self) -> bool {
        self.public_id != 0
    }
}

impl Default for CmdbType {
    fn default() -> Self {
        Self::new()
    }
}

fn default_active() -> bool {
    true
}

fn default_version() -> String {
    "1.0.0".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FieldKind;
    use serde_json::json;

    #[test]
    fn test_blank_type() {
        let blank = CmdbType::default();
        assert!(!blank.is_persisted());
        assert_eq!(blank.version, "1.0.0");
        assert_eq!(blank.display_name(), "");
    }

    #[test]
    fn test_type_from_backend_json() {
        let ty: CmdbType = serde_json::from_value(json!({
            "public_id": 3,
            "name": "server",
            "label": "Server",
            "author_id": 1,
            "active": true,
            "version": "1.0.2",
            "creation_time": "2024-03-01T10:00:00Z",
            "render_meta": {
                "icon": "fas fa-server",
                "sections": [
                    {"type": "section", "name": "general", "label": "General", "fields": ["hostname"]}
                ],
                "summary": {"fields": ["hostname"]},
                "externals": []
            },
            "fields": [
                {"type": "text", "name": "hostname", "label": "Hostname", "required": true},
                {"type": "number", "name": "cores", "label": "Cores"}
            ]
        }))
        .unwrap();

        assert!(ty.is_persisted());
        assert_eq!(ty.display_name(), "Server");
        assert_eq!(ty.render_meta.icon.as_deref(), Some("fas fa-server"));

        let form = ty.render_form().unwrap();
        assert_eq!(form.field("cores").unwrap().kind, FieldKind::Number);
        assert_eq!(form.unplaced_fields().len(), 1);
    }

    #[test]
    fn test_display_name_falls_back_to_name() {
        let mut ty = CmdbType::new();
        ty.name = "switch".to_string();
        assert_eq!(ty.display_name(), "switch");
    }
}
