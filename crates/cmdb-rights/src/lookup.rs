//! Capability lookup for the signed-in session.
//!
//! The gate only ever reads rights through [`CapabilityLookup`]. The session
//! snapshot is populated at login and never changes afterwards.

use std::sync::Arc;

use crate::rights::RightSet;

/// Read-only view of the rights a session holds.
pub trait CapabilityLookup {
    /// Check if the right is granted directly.
    fn has_right(&self, name: &str) -> bool;

    /// Check if the right is implied by a broader grant.
    fn has_extended_right(&self, name: &str) -> bool;
}

impl CapabilityLookup for RightSet {
    fn has_right(&self, name: &str) -> bool {
        self.has(name)
    }

    fn has_extended_right(&self, name: &str) -> bool {
        self.extends(name)
    }
}

impl<L: CapabilityLookup + ?Sized> CapabilityLookup for &L {
    fn has_right(&self, name: &str) -> bool {
        (**self).has_right(name)
    }

    fn has_extended_right(&self, name: &str) -> bool {
        (**self).has_extended_right(name)
    }
}

/// Rights of the active session.
///
/// Cheap to clone and safe to share between tasks.
///
/// # Example
///
/// ```
/// use cmdb_rights::{CapabilityLookup, RightSet, SessionRights};
///
/// let session = SessionRights::new("admin", RightSet::from_strings(&["base.*"]));
/// assert!(!session.has_right("base.framework.object.view"));
/// assert!(session.has_extended_right("base.framework.object.view"));
/// ```
#[derive(Debug, Clone)]
pub struct SessionRights {
    user_name: Arc<str>,
    rights: Arc<RightSet>,
}

impl SessionRights {
    /// Create a session snapshot for a user.
    pub fn new(user_name: impl Into<String>, rights: RightSet) -> Self {
        Self {
            user_name: Arc::from(user_name.into()),
            rights: Arc::new(rights),
        }
    }

    /// A session without any rights.
    pub fn anonymous() -> Self {
        Self::new("anonymous", RightSet::new())
    }

    /// The signed-in user name.
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// The underlying right set.
    pub fn rights(&self) -> &RightSet {
        &self.rights
    }
}

impl CapabilityLookup for SessionRights {
    fn has_right(&self, name: &str) -> bool {
        self.rights.has(name)
    }

    fn has_extended_right(&self, name: &str) -> bool {
        self.rights.extends(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_has_nothing() {
        let session = SessionRights::anonymous();
        assert_eq!(session.user_name(), "anonymous");
        assert!(!session.has_right("base.framework.object.view"));
        assert!(!session.has_extended_right("base.framework.object.view"));
    }

    #[test]
    fn test_right_set_lookup_through_reference() {
        fn granted<L: CapabilityLookup>(lookup: L, name: &str) -> bool {
            lookup.has_right(name)
        }

        let set = RightSet::from_strings(&["base.framework.type.view"]);
        assert!(granted(&set, "base.framework.type.view"));
        assert!(!granted(&set, "base.framework.type.edit"));
    }

    #[tokio::test]
    async fn test_session_shared_between_tasks() {
        let session = SessionRights::new(
            "operator",
            RightSet::from_strings(&["base.framework.object.*"]),
        );

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let session = session.clone();
                tokio::spawn(async move { session.has_extended_right("base.framework.object.edit") })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap());
        }
        assert_eq!(session.rights().len(), 1);
    }
}
