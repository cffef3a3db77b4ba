//! Snapshots: the full state of one side at one point in time.

use serde::{Deserialize, Serialize};

use crate::changes::Entity;
use crate::task::{Task, TaskList};
use crate::types::EntityId;

/// A snapshot of tasklists and tasks, unique by id per collection.
///
/// A snapshot is immutable once produced by a fetch; a new fetch replaces
/// it wholesale. The canonical snapshot is the exception: the state mutator
/// folds reconciled change-sets into it once per cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncState {
    /// All task lists on this side.
    pub tasklists: Vec<TaskList>,
    /// All tasks on this side, across every list.
    pub tasks: Vec<Task>,
}

impl SyncState {
    /// An empty snapshot, the canonical baseline at process start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the snapshot holds no entities at all.
    pub fn is_empty(&self) -> bool {
        self.tasklists.is_empty() && self.tasks.is_empty()
    }

    /// Look up a task list by id.
    pub fn task_list(&self, id: &EntityId) -> Option<&TaskList> {
        self.tasklists.iter().find(|l| &l.id == id)
    }

    /// Look up a task by id.
    pub fn task(&self, id: &EntityId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Insert or replace a task list by id.
    pub fn upsert_task_list(&mut self, list: TaskList) {
        upsert(&mut self.tasklists, list);
    }

    /// Insert or replace a task by id.
    pub fn upsert_task(&mut self, task: Task) {
        upsert(&mut self.tasks, task);
    }

    /// Remove a task list by id. Removing an unknown id is a no-op.
    pub fn remove_task_list(&mut self, id: &EntityId) -> bool {
        remove(&mut self.tasklists, id)
    }

    /// Remove a task by id. Removing an unknown id is a no-op.
    pub fn remove_task(&mut self, id: &EntityId) -> bool {
        remove(&mut self.tasks, id)
    }
}

/// Insert `entity` into `items`, replacing any existing entity with the
/// same id (last write wins).
pub fn upsert<E: Entity>(items: &mut Vec<E>, entity: E) {
    match items.iter().position(|e| e.entity_id() == entity.entity_id()) {
        Some(ix) => items[ix] = entity,
        None => items.push(entity),
    }
}

/// Remove the entity with `id` from `items`, if present.
///
/// Returns whether anything was removed.
pub fn remove<E: Entity>(items: &mut Vec<E>, id: &EntityId) -> bool {
    let before = items.len();
    items.retain(|e| e.entity_id() != id);
    items.len() != before
}
