//! # Render fields
//!
//! Typed field and section definitions used to render type and object forms.
//!
//! The backend sends fields as a flat list, each carrying a `type` tag, and
//! sections that refer to fields by name. [`RenderForm`] pairs the two and
//! indexes fields by name.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while assembling a render form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Two fields share a name
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    /// A section lists a field that does not exist
    #[error("Section {section} references unknown field {field}")]
    UnknownField {
        /// Section name.
        section: String,
        /// Missing field name.
        field: String,
    },
}

/// An option of a radio or select field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldOption {
    /// Stored value.
    pub name: String,

    /// Displayed label.
    pub label: String,
}

/// The kind of a field, with kind-specific settings.
///
/// Serialized as the `type` tag of the field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text.
    Text,

    /// Masked text.
    Password,

    /// Multi-line text.
    Textarea {
        /// Visible rows.
        #[serde(default = "default_rows")]
        rows: u32,
    },

    /// Numeric input.
    Number,

    /// Boolean checkbox.
    Checkbox,

    /// One of several options, shown as radio buttons.
    Radio {
        /// Available options.
        #[serde(default)]
        options: Vec<FieldOption>,
    },

    /// One of several options, shown as a drop-down.
    Select {
        /// Available options.
        #[serde(default)]
        options: Vec<FieldOption>,
    },

    /// Calendar date.
    Date,

    /// Reference to objects of other types.
    Ref {
        /// Type ids the reference may point to.
        #[serde(default)]
        ref_types: Vec<u64>,
    },

    /// Geographic location.
    Location,
}

impl FieldKind {
    /// The `type` tag of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Password => "password",
            FieldKind::Textarea { .. } => "textarea",
            FieldKind::Number => "number",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Radio { .. } => "radio",
            FieldKind::Select { .. } => "select",
            FieldKind::Date => "date",
            FieldKind::Ref { .. } => "ref",
            FieldKind::Location => "location",
        }
    }

    /// Options for choice fields, empty for every other kind.
    pub fn options(&self) -> &[FieldOption] {
        match self {
            FieldKind::Radio { options } | FieldKind::Select { options } => options,
            _ => &[],
        }
    }
}

fn default_rows() -> u32 {
    5
}

/// A single form field.
///
/// # Example
///
/// ```
/// use cmdb_framework::render::{Field, FieldKind};
///
/// let field: Field = serde_json::from_str(
///     r#"{"type": "select", "name": "os", "label": "OS",
///         "options": [{"name": "linux", "label": "Linux"}]}"#,
/// ).unwrap();
///
/// assert_eq!(field.kind.as_str(), "select");
/// assert_eq!(field.kind.options().len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Field {
    /// Unique field name within a type.
    pub name: String,

    /// Displayed label.
    pub label: String,

    /// Field kind and its settings.
    #[serde(flatten)]
    pub kind: FieldKind,

    /// Whether a value must be given.
    #[serde(default)]
    pub required: bool,

    /// Help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Input placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Value used when none is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl Field {
    /// Create an optional field without help text or default.
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            description: None,
            placeholder: None,
            default: None,
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A named group of fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    /// Unique section name.
    pub name: String,

    /// Displayed label.
    pub label: String,

    /// Field names in display order.
    #[serde(default)]
    pub fields: Vec<String>,
}

impl Section {
    /// Create a section over the given field names.
    pub fn new<I, S>(name: impl Into<String>, label: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            label: label.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// Sections plus their fields, indexed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderForm {
    sections: Vec<Section>,
    fields: Vec<Field>,
    index: HashMap<String, usize>,
}

impl RenderForm {
    /// Build a form, checking that names are unique and every section
    /// refers only to existing fields.
    pub fn new(sections: Vec<Section>, fields: Vec<Field>) -> Result<Self, RenderError> {
        let mut index = HashMap::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            if index.insert(field.name.clone(), position).is_some() {
                return Err(RenderError::DuplicateField(field.name.clone()));
            }
        }

        for section in &sections {
            if let Some(missing) = section.fields.iter().find(|name| !index.contains_key(*name)) {
                return Err(RenderError::UnknownField {
                    section: section.name.clone(),
                    field: missing.clone(),
                });
            }
        }

        Ok(Self {
            sections,
            fields,
            index,
        })
    }

    /// Look a field up by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.index.get(name).map(|&position| &self.fields[position])
    }

    /// The fields of a section, in section order.
    pub fn section_fields<'a>(&'a self, section: &'a Section) -> impl Iterator<Item = &'a Field> + 'a {
        section.fields.iter().filter_map(move |name| self.field(name))
    }

    /// All sections.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Fields not placed in any section.
    pub fn unplaced_fields(&self) -> Vec<&Field> {
        self.fields
            .iter()
            .filter(|field| {
                !self
                    .sections
                    .iter()
                    .any(|section| section.fields.contains(&field.name))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_fields() -> Vec<Field> {
        vec![
            Field::new("hostname", "Hostname", FieldKind::Text).required(),
            Field::new("ip", "IP address", FieldKind::Text),
            Field::new(
                "os",
                "Operating system",
                FieldKind::Select {
                    options: vec![FieldOption {
                        name: "linux".to_string(),
                        label: "Linux".to_string(),
                    }],
                },
            ),
        ]
    }

    #[test]
    fn test_field_lookup_by_name() {
        let sections = vec![Section::new("network", "Network", ["hostname", "ip"])];
        let form = RenderForm::new(sections, sample_fields()).unwrap();

        assert!(form.field("hostname").unwrap().required);
        assert_eq!(form.field("os").unwrap().kind.as_str(), "select");
        assert!(form.field("missing").is_none());

        let section = &form.sections()[0];
        let names: Vec<&str> = form.section_fields(section).map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["hostname", "ip"]);

        let unplaced: Vec<&str> = form.unplaced_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(unplaced, vec!["os"]);
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let mut fields = sample_fields();
        fields.push(Field::new("ip", "Second IP", FieldKind::Text));

        assert_eq!(
            RenderForm::new(Vec::new(), fields).unwrap_err(),
            RenderError::DuplicateField("ip".to_string())
        );
    }

    #[test]
    fn test_unknown_section_field_rejected() {
        let sections = vec![Section::new("hardware", "Hardware", ["cpu"])];
        let err = RenderForm::new(sections, sample_fields()).unwrap_err();
        assert!(matches!(err, RenderError::UnknownField { ref field, .. } if field == "cpu"));
    }

    #[test]
    fn test_field_kind_wire_format() {
        let field: Field = serde_json::from_value(json!({
            "type": "ref",
            "name": "location",
            "label": "Location",
            "ref_types": [4, 7],
            "required": true
        }))
        .unwrap();

        assert_eq!(field.kind, FieldKind::Ref { ref_types: vec![4, 7] });
        assert!(field.required);

        let textarea: Field =
            serde_json::from_value(json!({"type": "textarea", "name": "notes", "label": "Notes"})).unwrap();
        assert_eq!(textarea.kind, FieldKind::Textarea { rows: 5 });

        let value = serde_json::to_value(Field::new("active", "Active", FieldKind::Checkbox)).unwrap();
        assert_eq!(value["type"], "checkbox");
        assert_eq!(value["name"], "active");
    }

    #[test]
    fn test_unknown_field_kind_rejected() {
        let result: Result<Field, _> =
            serde_json::from_value(json!({"type": "hologram", "name": "x", "label": "X"}));
        assert!(result.is_err());
    }
}
