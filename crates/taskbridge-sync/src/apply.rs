//! State mutator: fold a change-set into a snapshot.

use taskbridge_core::state::{remove, upsert};
use taskbridge_core::{ChangeSet, Delta, Entity, SyncState};

/// Apply one entity kind's delta to its collection, in bucket order
/// added → updated → deleted.
///
/// Adds upsert rather than blindly append: a source snapshot fed back
/// through here may already contain an id from a prior cycle, and the
/// last write wins. Updates replace the whole entity and degrade to an
/// insert when the id is missing; the change-set's own classification is
/// the source of truth, a slight mismatch must not fail the cycle.
/// Deleting an unknown id is a no-op.
pub fn apply_delta<E: Entity>(items: &mut Vec<E>, delta: &Delta<E>) {
    for added in &delta.added {
        upsert(items, added.clone());
    }
    for update in &delta.updated {
        upsert(items, update.new_value.clone());
    }
    for deleted in &delta.deleted {
        remove(items, deleted);
    }
}

/// Apply a full change-set to a snapshot, lists then tasks.
///
/// The two collections are independent, so the order between entity kinds
/// does not affect the outcome.
pub fn apply_changes(state: &mut SyncState, changes: &ChangeSet) {
    apply_delta(&mut state.tasklists, &changes.tasklists);
    apply_delta(&mut state.tasks, &changes.tasks);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff_snapshots;
    use taskbridge_core::{EntityId, Task, TaskList, Update};

    fn snapshot(lists: Vec<TaskList>, tasks: Vec<Task>) -> SyncState {
        SyncState { tasklists: lists, tasks }
    }

    #[test]
    fn test_added_entities_are_inserted() {
        let mut state = SyncState::new();
        let mut changes = ChangeSet::new();
        changes.tasklists.added.push(TaskList::new("l1", "Groceries"));
        changes.tasks.added.push(Task::new("t1", "Buy milk", "l1"));

        apply_changes(&mut state, &changes);
        assert_eq!(state.tasklists.len(), 1);
        assert_eq!(state.tasks.len(), 1);
    }

    #[test]
    fn test_added_with_existing_id_overwrites() {
        let mut state = snapshot(vec![], vec![Task::new("t1", "Old", "l1")]);
        let mut changes = ChangeSet::new();
        changes.tasks.added.push(Task::new("t1", "New", "l1"));

        apply_changes(&mut state, &changes);
        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.tasks[0].title, "New");
    }

    #[test]
    fn test_update_replaces_whole_entity() {
        let mut state = snapshot(vec![], vec![Task::new("t1", "Buy milk", "l1")]);
        let mut changes = ChangeSet::new();
        changes
            .tasks
            .updated
            .push(Update::new(Task::new("t1", "Buy oat milk", "l2")));

        apply_changes(&mut state, &changes);
        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.tasks[0].title, "Buy oat milk");
        assert_eq!(state.tasks[0].task_list_id, EntityId::from("l2"));
    }

    #[test]
    fn test_update_for_unknown_id_degrades_to_insert() {
        let mut state = SyncState::new();
        let mut changes = ChangeSet::new();
        changes
            .tasks
            .updated
            .push(Update::new(Task::new("t1", "Buy milk", "l1")));

        apply_changes(&mut state, &changes);
        assert_eq!(state.tasks.len(), 1);
    }

    #[test]
    fn test_delete_removes_and_tolerates_unknown_ids() {
        let mut state = snapshot(vec![], vec![Task::new("t1", "Buy milk", "l1")]);
        let mut changes = ChangeSet::new();
        changes.tasks.deleted.push(EntityId::from("t1"));
        changes.tasks.deleted.push(EntityId::from("never-existed"));

        apply_changes(&mut state, &changes);
        assert!(state.tasks.is_empty());
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut changes = ChangeSet::new();
        changes.tasklists.added.push(TaskList::new("l1", "Groceries"));
        changes
            .tasks
            .updated
            .push(Update::new(Task::new("t1", "Buy oat milk", "l1")));
        changes.tasks.deleted.push(EntityId::from("t2"));

        let mut once = snapshot(
            vec![],
            vec![
                Task::new("t1", "Buy milk", "l1"),
                Task::new("t2", "Buy bread", "l1"),
            ],
        );
        apply_changes(&mut once, &changes);
        let mut twice = once.clone();
        apply_changes(&mut twice, &changes);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_diff_then_apply_round_trips() {
        let state = snapshot(
            vec![TaskList::new("l1", "Groceries")],
            vec![
                Task::new("t1", "Buy milk", "l1"),
                Task::new("t2", "Buy bread", "l1"),
            ],
        );
        let target = snapshot(
            vec![TaskList::new("l1", "Errands"), TaskList::new("l2", "Work")],
            vec![Task::new("t2", "Buy sourdough", "l2")],
        );

        let mut rebuilt = state.clone();
        apply_changes(&mut rebuilt, &diff_snapshots(&state, &target));

        // Same id sets and field values; order may differ.
        assert!(diff_snapshots(&rebuilt, &target).is_empty());
        assert!(diff_snapshots(&target, &rebuilt).is_empty());
        assert_eq!(rebuilt.tasks.len(), target.tasks.len());
        assert_eq!(rebuilt.tasklists.len(), target.tasklists.len());
    }
}
