//! # Permission Gate
//!
//! Decides whether a permission-gated piece of UI is mounted.
//!
//! A view declares the rights it needs as a [`RightRequirement`]. The gate
//! evaluates the requirement against a [`CapabilityLookup`] whenever the
//! requirement changes and mounts or clears its [`ViewContainer`].

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{RightsError, RightsResult};
use crate::lookup::CapabilityLookup;

/// Ordered list of right names, satisfied if any one of them is granted.
///
/// A single right name is normalized to a one-element list.
///
/// # Example
///
/// ```
/// use cmdb_rights::RightRequirement;
///
/// let single = RightRequirement::from("base.framework.object.view");
/// assert_eq!(single.len(), 1);
///
/// let any = RightRequirement::from(vec!["base.framework.object.edit", "base.framework.object.add"]);
/// assert_eq!(any.rights()[1], "base.framework.object.add");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RequirementInput", into = "Vec<String>")]
pub struct RightRequirement {
    rights: Vec<String>,
}

/// Wire form accepting either a string or a list of strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RequirementInput {
    One(String),
    Many(Vec<String>),
}

impl From<RequirementInput> for RightRequirement {
    fn from(input: RequirementInput) -> Self {
        match input {
            RequirementInput::One(right) => Self::from(right),
            RequirementInput::Many(rights) => Self::from(rights),
        }
    }
}

impl RightRequirement {
    /// Create a requirement from any list of right names.
    pub fn any_of<I, S>(rights: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rights: rights.into_iter().map(Into::into).collect(),
        }
    }

    /// The required right names, in declaration order.
    pub fn rights(&self) -> &[String] {
        &self.rights
    }

    /// Number of right names.
    pub fn len(&self) -> usize {
        self.rights.len()
    }

    /// Check if no right names were given.
    pub fn is_empty(&self) -> bool {
        self.rights.is_empty()
    }
}

impl From<RightRequirement> for Vec<String> {
    fn from(requirement: RightRequirement) -> Self {
        requirement.rights
    }
}

impl From<&str> for RightRequirement {
    fn from(right: &str) -> Self {
        Self::any_of([right])
    }
}

impl From<String> for RightRequirement {
    fn from(right: String) -> Self {
        Self { rights: vec![right] }
    }
}

impl From<Vec<String>> for RightRequirement {
    fn from(rights: Vec<String>) -> Self {
        Self { rights }
    }
}

impl From<Vec<&str>> for RightRequirement {
    fn from(rights: Vec<&str>) -> Self {
        Self::any_of(rights)
    }
}

impl From<&[&str]> for RightRequirement {
    fn from(rights: &[&str]) -> Self {
        Self::any_of(rights.iter().copied())
    }
}

/// Evaluate a requirement against a capability lookup.
///
/// Rights are scanned in order. A direct grant returns `true` at once. An
/// extended grant is remembered, but the scan keeps going so a later direct
/// grant is still checked. An empty requirement is never satisfied.
///
/// # Example
///
/// ```
/// use cmdb_rights::{evaluate, RightRequirement, RightSet};
///
/// let rights = RightSet::from_strings(&["base.framework.*"]);
/// let req = RightRequirement::from(vec!["base.user-management.user.view", "base.framework.type.view"]);
/// assert!(evaluate(&req, &rights));
/// ```
pub fn evaluate<L>(requirement: &RightRequirement, lookup: &L) -> bool
where
    L: CapabilityLookup + ?Sized,
{
    let mut granted = false;

    for right in requirement.rights() {
        if lookup.has_right(right) {
            trace!(right = %right, "Direct right granted");
            return true;
        } else if lookup.has_extended_right(right) {
            trace!(right = %right, "Extended right granted");
            granted = true;
        }
    }

    granted
}

/// Guard for a single right, failing with [`RightsError::Forbidden`].
///
/// Direct and extended grants both pass.
pub fn require_right<L>(lookup: &L, right: &str) -> RightsResult<()>
where
    L: CapabilityLookup + ?Sized,
{
    if lookup.has_right(right) || lookup.has_extended_right(right) {
        Ok(())
    } else {
        debug!(right = %right, "Right check failed");
        Err(RightsError::Forbidden {
            right: right.to_string(),
        })
    }
}

/// Target of a gate decision.
///
/// Implemented by whatever hosts the gated subtree.
pub trait ViewContainer {
    /// Create the gated view.
    fn mount(&mut self);

    /// Remove the gated view, if any.
    fn clear(&mut self);
}

/// What the gate did in response to a requirement change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// The view was mounted.
    Mounted,
    /// The view was cleared.
    Cleared,
    /// Nothing was done.
    Unchanged,
}

/// Mounts or clears a view container depending on the session's rights.
///
/// # Example
///
/// ```
/// use cmdb_rights::{GateDecision, PermissionGate, RightRequirement, RightSet, ViewContainer};
///
/// #[derive(Default)]
/// struct Link { visible: bool }
///
/// impl ViewContainer for Link {
///     fn mount(&mut self) { self.visible = true; }
///     fn clear(&mut self) { self.visible = false; }
/// }
///
/// let rights = RightSet::from_strings(&["base.framework.object.add"]);
/// let mut gate = PermissionGate::new(rights, Link::default());
///
/// let decision = gate.set_required_rights(Some(RightRequirement::from("base.framework.object.add")));
/// assert_eq!(decision, GateDecision::Mounted);
/// assert!(gate.container().visible);
/// ```
#[derive(Debug)]
pub struct PermissionGate<L, C> {
    lookup: L,
    container: C,
    required: RightRequirement,
    mounted: bool,
}

impl<L, C> PermissionGate<L, C>
where
    L: CapabilityLookup,
    C: ViewContainer,
{
    /// Create a gate with no requirement set. Nothing is mounted yet.
    pub fn new(lookup: L, container: C) -> Self {
        Self {
            lookup,
            container,
            required: RightRequirement::default(),
            mounted: false,
        }
    }

    /// Update the required rights and re-evaluate.
    ///
    /// `None` stands for an unset input: the previous requirement is kept and
    /// the container is left alone.
    pub fn set_required_rights(&mut self, rights: Option<RightRequirement>) -> GateDecision {
        let Some(rights) = rights else {
            trace!("Required rights unset, leaving view untouched");
            return GateDecision::Unchanged;
        };

        self.required = rights;
        self.update_view()
    }

    fn update_view(&mut self) -> GateDecision {
        if evaluate(&self.required, &self.lookup) {
            if self.mounted {
                return GateDecision::Unchanged;
            }
            debug!(rights = ?self.required.rights(), "Mounting permission-gated view");
            self.container.mount();
            self.mounted = true;
            GateDecision::Mounted
        } else {
            debug!(rights = ?self.required.rights(), "Clearing permission-gated view");
            self.container.clear();
            self.mounted = false;
            GateDecision::Cleared
        }
    }

    /// The current requirement.
    pub fn required_rights(&self) -> &RightRequirement {
        &self.required
    }

    /// Check if the gated view is mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// The view container.
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Consume the gate, returning the view container.
    pub fn into_container(self) -> C {
        self.container
    }
}
