//! Change-sets: the delta between two snapshots.
//!
//! A [`ChangeSet`] carries one [`Delta`] per entity kind. Within a delta an
//! id appears in at most one of the three buckets; the comparator produces
//! deltas with that shape and the reconciler preserves it.

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskList};
use crate::types::EntityId;

/// The contract a type must meet to participate in diffing.
///
/// `content_eq` is the change predicate, deliberately narrower than full
/// equality: fields that are not synchronized (links, completion
/// timestamps) do not make an entity "changed".
pub trait Entity: Clone + Send + Sync {
    /// The entity's stable external id.
    fn entity_id(&self) -> &EntityId;

    /// Whether `other` carries the same synchronized content.
    fn content_eq(&self, other: &Self) -> bool;
}

/// Replacement value for an existing entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Update<E> {
    /// Id of the entity being replaced.
    pub id: EntityId,
    /// The full new value; updates replace, they never field-merge.
    pub new_value: E,
}

impl<E: Entity> Update<E> {
    /// Build an update from a new entity value.
    pub fn new(new_value: E) -> Self {
        Self {
            id: new_value.entity_id().clone(),
            new_value,
        }
    }
}

/// Additions, updates, and deletions for one entity kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delta<E> {
    /// Entities present in the new snapshot but not the old.
    pub added: Vec<E>,
    /// Entities present in both whose synchronized content differs.
    pub updated: Vec<Update<E>>,
    /// Ids present in the old snapshot but not the new.
    pub deleted: Vec<EntityId>,
}

// Manual Default: derive would require E: Default.
impl<E> Default for Delta<E> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            updated: Vec::new(),
            deleted: Vec::new(),
        }
    }
}

impl<E> Delta<E> {
    /// An empty delta.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether all three buckets are empty.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }

    /// Total number of operations across buckets.
    pub fn len(&self) -> usize {
        self.added.len() + self.updated.len() + self.deleted.len()
    }

    /// Whether `id` appears in any bucket of this delta.
    pub fn touches(&self, id: &EntityId) -> bool
    where
        E: Entity,
    {
        self.added.iter().any(|e| e.entity_id() == id)
            || self.updated.iter().any(|u| &u.id == id)
            || self.deleted.iter().any(|d| d == id)
    }
}

/// The full delta between two snapshots: one [`Delta`] per entity kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Task-list operations.
    pub tasklists: Delta<TaskList>,
    /// Task operations.
    pub tasks: Delta<Task>,
}

impl ChangeSet {
    /// An empty change-set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every bucket of both deltas is empty.
    pub fn is_empty(&self) -> bool {
        self.tasklists.is_empty() && self.tasks.is_empty()
    }

    /// Total number of operations across both entity kinds.
    pub fn len(&self) -> usize {
        self.tasklists.len() + self.tasks.len()
    }
}
