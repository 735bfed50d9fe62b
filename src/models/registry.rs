//! Enrolment registry.
//!
//! The [`Registry`] holds every enrolled parent and child and resolves the
//! id references between them. It is passed explicitly to whatever needs to
//! enumerate families; there is no process-wide parent collection.

use std::collections::{BTreeMap, HashSet};

use tracing::warn;

use super::{Child, Parent};
use crate::error::{BillingError, BillingResult};

/// Parents and children enrolled at one daycare.
///
/// # Example
///
/// ```
/// use daycare_billing::models::{Child, Parent, Registry, WeeklySchedule};
/// use rust_decimal::Decimal;
///
/// let mut registry = Registry::new();
/// registry.add_parent(Parent::new("parent_001", "Alice Moreno", "alice@example.com")).unwrap();
/// registry.enrol_child(Child {
///     id: "child_001".to_string(),
///     name: "Mia Moreno".to_string(),
///     date_of_birth: None,
///     schedule: WeeklySchedule::weekdays(),
///     day_rate: Decimal::new(5000, 2),
///     parent_id: "parent_001".to_string(),
/// }).unwrap();
///
/// let parent = registry.parent("parent_001").unwrap();
/// assert_eq!(registry.children_of(parent).len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    parents: BTreeMap<String, Parent>,
    children: BTreeMap<String, Child>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enrols a parent.
    ///
    /// Listed child ids are deduplicated, and ids of enrolled children that
    /// belong to another parent are dropped. Children already enrolled with
    /// this parent's id are then linked in id order after the listed ones.
    pub fn add_parent(&mut self, mut parent: Parent) -> BillingResult<()> {
        if self.parents.contains_key(&parent.id) {
            return Err(BillingError::DuplicateRecord {
                kind: "parent".to_string(),
                id: parent.id,
            });
        }

        let mut seen = HashSet::new();
        parent.child_ids.retain(|child_id| {
            if !seen.insert(child_id.clone()) {
                warn!(
                    parent_id = %parent.id,
                    child_id = %child_id,
                    "Dropping duplicate child id from parent record"
                );
                return false;
            }
            match self.children.get(child_id) {
                Some(child) if child.parent_id != parent.id => {
                    warn!(
                        parent_id = %parent.id,
                        child_id = %child_id,
                        owner_id = %child.parent_id,
                        "Dropping child id enrolled under another parent"
                    );
                    false
                }
                _ => true,
            }
        });

        for child in self.children.values() {
            if child.parent_id == parent.id && !parent.child_ids.contains(&child.id) {
                parent.child_ids.push(child.id.clone());
            }
        }

        self.parents.insert(parent.id.clone(), parent);
        Ok(())
    }

    /// Enrols a child and links it to its parent.
    ///
    /// A child whose parent is not enrolled is kept, but is billed to nobody
    /// until that parent is added.
    pub fn enrol_child(&mut self, child: Child) -> BillingResult<()> {
        if self.children.contains_key(&child.id) {
            return Err(BillingError::DuplicateRecord {
                kind: "child".to_string(),
                id: child.id,
            });
        }

        match self.parents.get_mut(&child.parent_id) {
            Some(parent) => {
                if !parent.child_ids.contains(&child.id) {
                    parent.child_ids.push(child.id.clone());
                }
            }
            None => warn!(
                child_id = %child.id,
                parent_id = %child.parent_id,
                "Enrolled child references unknown parent"
            ),
        }

        self.children.insert(child.id.clone(), child);
        Ok(())
    }

    /// Looks up a parent by id.
    pub fn parent(&self, id: &str) -> BillingResult<&Parent> {
        self.parents
            .get(id)
            .ok_or_else(|| BillingError::ParentNotFound { id: id.to_string() })
    }

    /// Looks up a child by id.
    pub fn child(&self, id: &str) -> BillingResult<&Child> {
        self.children
            .get(id)
            .ok_or_else(|| BillingError::ChildNotFound { id: id.to_string() })
    }

    /// Returns a parent's enrolled children in enrolment order.
    ///
    /// Only children whose `parent_id` is this parent are returned, each at
    /// most once. Listed ids with no enrolled child are skipped.
    pub fn children_of(&self, parent: &Parent) -> Vec<&Child> {
        let mut seen = HashSet::new();
        parent
            .child_ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .filter_map(|id| self.children.get(id))
            .filter(|child| child.parent_id == parent.id)
            .collect()
    }

    /// Iterates all parents ordered by id.
    pub fn parents(&self) -> impl Iterator<Item = &Parent> {
        self.parents.values()
    }

    /// Iterates all children ordered by id.
    pub fn children(&self) -> impl Iterator<Item = &Child> {
        self.children.values()
    }

    /// Iterates children whose parent is not enrolled.
    pub fn orphans(&self) -> impl Iterator<Item = &Child> {
        self.children
            .values()
            .filter(|child| !self.parents.contains_key(&child.parent_id))
    }
}
