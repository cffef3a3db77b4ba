//! Snapshot validation: referential checks.

use crate::state::SyncState;
use crate::types::EntityId;

/// A task whose owning list is missing from the same snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingTask {
    /// The task with the broken reference.
    pub task_id: EntityId,
    /// The list id it points at.
    pub task_list_id: EntityId,
}

/// Report every task whose `task_list_id` does not resolve within `state`.
///
/// A dangling reference is legal mid-sync (a list deletion can land before
/// its tasks are re-homed), so callers log the report rather than failing
/// the cycle on it.
pub fn check_references(state: &SyncState) -> Vec<DanglingTask> {
    state
        .tasks
        .iter()
        .filter(|task| state.task_list(&task.task_list_id).is_none())
        .map(|task| DanglingTask {
            task_id: task.id.clone(),
            task_list_id: task.task_list_id.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Task, TaskList};

    #[test]
    fn test_resolved_references_pass() {
        let mut state = SyncState::new();
        state.upsert_task_list(TaskList::new("l1", "Groceries"));
        state.upsert_task(Task::new("t1", "Buy milk", "l1"));

        assert!(check_references(&state).is_empty());
    }

    #[test]
    fn test_dangling_task_is_reported() {
        let mut state = SyncState::new();
        state.upsert_task(Task::new("t1", "Buy milk", "l-gone"));

        let report = check_references(&state);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].task_id, EntityId::from("t1"));
        assert_eq!(report[0].task_list_id, EntityId::from("l-gone"));
    }

    #[test]
    fn test_empty_snapshot_passes() {
        assert!(check_references(&SyncState::new()).is_empty());
    }
}
