//! Object domain models
//!
//! Objects are the configuration items themselves: instances of a type,
//! holding one value per type field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A configuration item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CmdbObject {
    /// Server-assigned id, 0 until created
    #[serde(default)]
    pub public_id: u64,

    /// Id of the object's type
    pub type_id: u64,

    /// Object version
    #[serde(default = "default_version")]
    pub version: String,

    /// Id of the user who created the object
    #[serde(default)]
    pub author_id: u64,

    /// Whether the object is active
    #[serde(default = "default_active")]
    pub active: bool,

    /// When the object was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,

    /// When the object was last changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edit_time: Option<DateTime<Utc>>,

    /// Field values
    #[serde(default)]
    pub fields: Vec<ObjectField>,
}

/// The value of one field of an object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObjectField {
    /// Field name, matching a field of the type
    pub name: String,

    /// Stored value
    #[serde(default)]
    pub value: serde_json::Value,
}

impl CmdbObject {
    /// Create an empty object of a type.
    pub fn new(type_id: u64) -> Self {
        Self {
            public_id: 0,
            type_id,
            version: default_version(),
            author_id: 0,
            active: default_active(),
            creation_time: None,
            last_edit_time: None,
            fields: Vec::new(),
        }
    }

    /// Get a field value by name.
    pub fn value(&self, name: &str) -> Option<&serde_json::Value> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    /// Set a field value, adding the field if missing.
    pub fn set_value(&mut self, name: impl Into<String>, value: serde_json::Value) {
        let name = name.into();
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => field.value = value,
            None => self.fields.push(ObjectField { name, value }),
        }
    }
}

fn default_active() -> bool {
    true
}

fn default_version() -> String {
    "1.0.0".to_string()
}
