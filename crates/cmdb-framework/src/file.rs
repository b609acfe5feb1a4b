//! File elements stored by the CMDB media store.

use serde::{Deserialize, Serialize};

/// A stored file or folder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileElement {
    /// Server-assigned id
    #[serde(default)]
    pub public_id: u64,

    /// File name including extension
    #[serde(alias = "filename")]
    pub name: String,

    /// Size in bytes
    #[serde(default)]
    pub size: u64,

    /// Whether this element is a folder
    #[serde(default)]
    pub folder: bool,

    /// Id of the containing folder, `None` at the root
    #[serde(default)]
    pub parent: Option<u64>,

    /// Free-form metadata
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl FileElement {
    /// File extension in lower case, if any.
    pub fn extension(&self) -> Option<String> {
        if self.folder {
            return None;
        }
        self.name
            .rsplit_once('.')
            .filter(|(stem, _)| !stem.is_empty())
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }
}
