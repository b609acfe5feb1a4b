//! Category domain models
//!
//! Categories group types for navigation. They form a tree through their
//! `parent` references; the backend also serves the assembled tree.

use serde::{Deserialize, Serialize};

use crate::types::CmdbType;

/// A category of types.
///
/// # Examples
///
/// ```
/// use cmdb_framework::CmdbCategory;
///
/// let category = CmdbCategory::new("network", "Network");
/// assert!(category.is_root());
/// assert!(category.types.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CmdbCategory {
    /// Server-assigned id, 0 until created
    #[serde(default)]
    pub public_id: u64,

    /// Unique machine name
    pub name: String,

    /// Human-readable label
    #[serde(default)]
    pub label: String,

    /// Display settings
    #[serde(default)]
    pub meta: CategoryMeta,

    /// Parent category id, `None` for root categories
    #[serde(default)]
    pub parent: Option<u64>,

    /// Ids of the types in this category
    #[serde(default)]
    pub types: Vec<u64>,
}

/// Display settings of a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryMeta {
    /// Icon class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Sort position among siblings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl CmdbCategory {
    /// Create a root category that has not been stored yet.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            public_id: 0,
            name: name.into(),
            label: label.into(),
            meta: CategoryMeta::default(),
            parent: None,
            types: Vec::new(),
        }
    }

    /// Check if the category has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// A category with its child categories and resolved types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryNode {
    /// The category itself
    pub category: CmdbCategory,

    /// Child nodes
    #[serde(default)]
    pub children: Vec<CategoryNode>,

    /// Types assigned to the category
    #[serde(default)]
    pub types: Vec<CmdbType>,
}

/// The category hierarchy as served by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CmdbCategoryTree {
    /// Root nodes
    pub nodes: Vec<CategoryNode>,
}

impl CmdbCategoryTree {
    /// Find a node by category id, searching depth first.
    pub fn find(&self, public_id: u64) -> Option<&CategoryNode> {
        fn search(nodes: &[CategoryNode], public_id: u64) -> Option<&CategoryNode> {
            for node in nodes {
                if node.category.public_id == public_id {
                    return Some(node);
                }
                if let Some(found) = search(&node.children, public_id) {
                    return Some(found);
                }
            }
            None
        }

        search(&self.nodes, public_id)
    }

    /// All categories in depth-first order, paired with their depth.
    pub fn flatten(&self) -> Vec<(usize, &CmdbCategory)> {
        fn walk<'a>(nodes: &'a [CategoryNode], depth: usize, out: &mut Vec<(usize, &'a CmdbCategory)>) {
            for node in nodes {
                out.push((depth, &node.category));
                walk(&node.children, depth + 1, out);
            }
        }

        let mut out = Vec::new();
        walk(&self.nodes, 0, &mut out);
        out
    }

    /// Number of categories in the tree.
    pub fn len(&self) -> usize {
        self.flatten().len()
    }

    /// Check if the tree has no categories.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
