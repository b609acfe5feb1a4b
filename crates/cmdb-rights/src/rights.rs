//! # Rights
//!
//! Right names and the sets of rights granted to a session.
//! A right is a dot-separated path; a trailing `*` segment makes it a wildcard.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{RightsError, RightsResult};

/// Segment that turns a right into a wildcard.
const WILDCARD: &str = "*";

/// A single right name such as `base.framework.object.view`.
///
/// Rights can be:
/// - **Concrete**: Name one capability (`base.framework.object.view`)
/// - **Wildcard**: Grant everything below a prefix (`base.framework.*`)
///
/// # Example
///
/// ```
/// use cmdb_rights::rights::Right;
///
/// let right = Right::parse("base.framework.object.view").unwrap();
/// assert!(!right.is_wildcard());
///
/// let wildcard = Right::parse("base.framework.*").unwrap();
/// assert!(wildcard.is_wildcard());
/// assert!(wildcard.covers("base.framework.object.view"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Right {
    name: String,
}

impl Right {
    /// Parse a right name.
    ///
    /// Segments must be non-empty and made of ASCII alphanumerics, `_` or `-`.
    /// Only the last segment may be the wildcard `*`.
    pub fn parse(name: &str) -> RightsResult<Self> {
        let segments: Vec<&str> = name.split('.').collect();
        let last = segments.len() - 1;

        for (index, segment) in segments.iter().enumerate() {
            let valid = if *segment == WILDCARD {
                index == last && index > 0
            } else {
                !segment.is_empty()
                    && segment
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            };

            if !valid {
                return Err(RightsError::InvalidRightName(name.to_string()));
            }
        }

        Ok(Self {
            name: name.to_string(),
        })
    }

    /// The full right name.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Check if this right ends in a wildcard segment.
    pub fn is_wildcard(&self) -> bool {
        self.name.ends_with(".*")
    }

    /// The prefix a wildcard grants, without the trailing `.*`.
    pub fn prefix(&self) -> Option<&str> {
        self.name.strip_suffix(".*")
    }

    /// Check if this right grants `name`.
    ///
    /// A concrete right covers only itself. A wildcard covers every name it
    /// appears in [`Right::covering_wildcards`] for, including deeper wildcards.
    pub fn covers(&self, name: &str) -> bool {
        if self.is_wildcard() {
            Right::covering_wildcards(name)
                .iter()
                .any(|wildcard| *wildcard == self.name)
        } else {
            self.name == name
        }
    }

    /// The wildcard rights that would cover `name`, nearest first.
    ///
    /// `base.framework.object.view` yields `base.framework.object.*`,
    /// `base.framework.*` and `base.*`.
    pub fn covering_wildcards(name: &str) -> Vec<String> {
        let segments: Vec<&str> = name.split('.').collect();
        (1..segments.len())
            .rev()
            .map(|len| format!("{}.{}", segments[..len].join("."), WILDCARD))
            .filter(|candidate| candidate != name)
            .collect()
    }
}

impl fmt::Display for Right {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl TryFrom<String> for Right {
    type Error = RightsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Right::parse(&value)
    }
}

impl From<Right> for String {
    fn from(right: Right) -> Self {
        right.name
    }
}

/// The rights granted to a user.
///
/// Stores right names as strings so lookups by name need no parsing.
/// Serializes as a list of right names; every name is parsed on the way in.
///
/// # Example
///
/// ```
/// use cmdb_rights::rights::RightSet;
///
/// let mut set = RightSet::new();
/// set.grant_str("base.framework.object.view").unwrap();
/// set.grant_str("base.framework.type.*").unwrap();
///
/// assert!(set.has("base.framework.object.view"));
/// assert!(set.extends("base.framework.type.edit"));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Vec<Right>", into = "Vec<Right>")]
pub struct RightSet {
    rights: HashSet<String>,
}

impl RightSet {
    /// Create a new empty right set.
    pub fn new() -> Self {
        Self {
            rights: HashSet::new(),
        }
    }

    /// Grant a right.
    pub fn grant(&mut self, right: Right) {
        self.rights.insert(right.name);
    }

    /// Parse and grant a right.
    pub fn grant_str(&mut self, name: &str) -> RightsResult<()> {
        self.grant(Right::parse(name)?);
        Ok(())
    }

    /// Grant multiple rights.
    pub fn grant_all<I>(&mut self, rights: I)
    where
        I: IntoIterator<Item = Right>,
    {
        for right in rights {
            self.grant(right);
        }
    }

    /// Revoke a right.
    ///
    /// # Returns
    ///
    /// `true` if the right was present, `false` otherwise
    pub fn revoke(&mut self, name: &str) -> bool {
        self.rights.remove(name)
    }

    /// Check if `name` is held verbatim.
    pub fn has(&self, name: &str) -> bool {
        self.rights.contains(name)
    }

    /// Check if a held wildcard covers `name`.
    ///
    /// The right itself being held does not count; use [`RightSet::has`] for that.
    pub fn extends(&self, name: &str) -> bool {
        Right::covering_wildcards(name)
            .iter()
            .any(|wildcard| self.rights.contains(wildcard))
    }

    /// Get all rights in the set.
    pub fn all(&self) -> Vec<Right> {
        self.rights
            .iter()
            .filter_map(|name| Right::parse(name).ok())
            .collect()
    }

    /// Merge another right set into this one.
    pub fn merge(&mut self, other: &RightSet) {
        for right in &other.rights {
            self.rights.insert(right.clone());
        }
    }

    /// Create from a list of right names, skipping invalid ones.
    ///
    /// # Example
    ///
    /// ```
    /// use cmdb_rights::rights::RightSet;
    ///
    /// let set = RightSet::from_strings(&["base.framework.object.view", "not a right"]);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn from_strings(names: &[&str]) -> Self {
        let mut set = Self::new();
        for name in names {
            if let Ok(right) = Right::parse(name) {
                set.grant(right);
            }
        }
        set
    }

    /// Get the count of rights.
    pub fn len(&self) -> usize {
        self.rights.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.rights.is_empty()
    }

    /// Clear all rights.
    pub fn clear(&mut self) {
        self.rights.clear();
    }
}

impl FromIterator<Right> for RightSet {
    fn from_iter<T: IntoIterator<Item = Right>>(iter: T) -> Self {
        let mut set = RightSet::new();
        set.grant_all(iter);
        set
    }
}

impl From<Vec<Right>> for RightSet {
    fn from(rights: Vec<Right>) -> Self {
        rights.into_iter().collect()
    }
}

impl From<RightSet> for Vec<Right> {
    fn from(set: RightSet) -> Self {
        let mut rights = set.all();
        rights.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        rights
    }
}
