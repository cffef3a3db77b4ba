//! Property tests over the reconciliation core.
//!
//! These pin down the algebraic contracts: a snapshot diffs to nothing
//! against itself, diff-then-apply reconstructs the target, application
//! is idempotent, and reconciliation never lets the secondary source
//! override the primary.

use std::collections::HashSet;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use taskbridge_core::{ChangeSet, Delta, Entity, EntityId, SyncState};
use taskbridge_sync::{apply_changes, diff_snapshots, reconcile};
use taskbridge_testkit::generators::sync_state;

fn bucket_ids<E: Entity>(delta: &Delta<E>) -> [HashSet<EntityId>; 3] {
    [
        delta.added.iter().map(|e| e.entity_id().clone()).collect(),
        delta.updated.iter().map(|u| u.id.clone()).collect(),
        delta.deleted.iter().cloned().collect(),
    ]
}

fn assert_disjoint<E: Entity>(delta: &Delta<E>) -> Result<(), TestCaseError> {
    let [added, updated, deleted] = bucket_ids(delta);
    prop_assert!(added.is_disjoint(&updated));
    prop_assert!(added.is_disjoint(&deleted));
    prop_assert!(updated.is_disjoint(&deleted));
    Ok(())
}

fn assert_primary_preserved<E: Entity>(
    merged_delta: &Delta<E>,
    primary_delta: &Delta<E>,
) -> Result<(), TestCaseError> {
    let [added, updated, deleted] = bucket_ids(merged_delta);
    let [p_added, p_updated, p_deleted] = bucket_ids(primary_delta);
    prop_assert!(p_added.is_subset(&added));
    prop_assert!(p_updated.is_subset(&updated));
    prop_assert!(p_deleted.is_subset(&deleted));
    Ok(())
}

fn states_equivalent(a: &SyncState, b: &SyncState) -> bool {
    diff_snapshots(a, b).is_empty()
        && diff_snapshots(b, a).is_empty()
        && a.tasklists.len() == b.tasklists.len()
        && a.tasks.len() == b.tasks.len()
}

proptest! {
    #[test]
    fn self_diff_is_empty(state in sync_state()) {
        prop_assert!(diff_snapshots(&state, &state).is_empty());
    }

    #[test]
    fn diff_against_empty_is_all_added_or_all_deleted(state in sync_state()) {
        let empty = SyncState::new();

        let gained = diff_snapshots(&empty, &state);
        prop_assert_eq!(gained.tasklists.added.len(), state.tasklists.len());
        prop_assert_eq!(gained.tasks.added.len(), state.tasks.len());
        prop_assert!(gained.tasklists.updated.is_empty() && gained.tasklists.deleted.is_empty());
        prop_assert!(gained.tasks.updated.is_empty() && gained.tasks.deleted.is_empty());

        let lost = diff_snapshots(&state, &empty);
        prop_assert_eq!(lost.tasklists.deleted.len(), state.tasklists.len());
        prop_assert_eq!(lost.tasks.deleted.len(), state.tasks.len());
        prop_assert!(lost.tasklists.added.is_empty() && lost.tasklists.updated.is_empty());
        prop_assert!(lost.tasks.added.is_empty() && lost.tasks.updated.is_empty());
    }

    #[test]
    fn diff_buckets_are_disjoint(old in sync_state(), new in sync_state()) {
        let changes = diff_snapshots(&old, &new);
        assert_disjoint(&changes.tasklists)?;
        assert_disjoint(&changes.tasks)?;
    }

    #[test]
    fn diff_then_apply_reconstructs_the_target(state in sync_state(), target in sync_state()) {
        let mut rebuilt = state.clone();
        apply_changes(&mut rebuilt, &diff_snapshots(&state, &target));
        prop_assert!(states_equivalent(&rebuilt, &target));
    }

    #[test]
    fn apply_is_idempotent(state in sync_state(), target in sync_state()) {
        let changes = diff_snapshots(&state, &target);

        let mut once = state.clone();
        apply_changes(&mut once, &changes);
        let mut twice = once.clone();
        apply_changes(&mut twice, &changes);

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn reconcile_keeps_every_primary_operation(
        base in sync_state(),
        edited_secondary in sync_state(),
        edited_primary in sync_state(),
    ) {
        let secondary = diff_snapshots(&base, &edited_secondary);
        let primary = diff_snapshots(&base, &edited_primary);
        let merged = reconcile(&secondary, &primary);

        assert_primary_preserved(&merged.tasklists, &primary.tasklists)?;
        assert_primary_preserved(&merged.tasks, &primary.tasks)?;
    }

    #[test]
    fn reconcile_output_buckets_stay_disjoint(
        base in sync_state(),
        edited_secondary in sync_state(),
        edited_primary in sync_state(),
    ) {
        let merged = reconcile(
            &diff_snapshots(&base, &edited_secondary),
            &diff_snapshots(&base, &edited_primary),
        );
        assert_disjoint(&merged.tasklists)?;
        assert_disjoint(&merged.tasks)?;
    }

    #[test]
    fn surviving_secondary_entries_were_untouched_by_the_primary(
        base in sync_state(),
        edited_secondary in sync_state(),
        edited_primary in sync_state(),
    ) {
        let secondary = diff_snapshots(&base, &edited_secondary);
        let primary = diff_snapshots(&base, &edited_primary);
        let merged = reconcile(&secondary, &primary);

        // Any merged update whose value disagrees with the primary's must
        // come from the secondary, over an id the primary never touched.
        for update in &merged.tasks.updated {
            if !primary.tasks.touches(&update.id) {
                let from_secondary = secondary
                    .tasks
                    .updated
                    .iter()
                    .any(|u| u.id == update.id);
                prop_assert!(from_secondary);
            }
        }
        for deleted in &merged.tasks.deleted {
            if !primary.tasks.touches(deleted) {
                prop_assert!(secondary.tasks.deleted.contains(deleted));
            }
        }
    }

    #[test]
    fn reconciled_apply_converges_for_shared_baseline(
        base in sync_state(),
        edited_secondary in sync_state(),
        edited_primary in sync_state(),
    ) {
        let merged = reconcile(
            &diff_snapshots(&base, &edited_secondary),
            &diff_snapshots(&base, &edited_primary),
        );

        let mut canonical = base.clone();
        apply_changes(&mut canonical, &merged);

        // Every canonical entity originates from one of the three inputs.
        let known_task_ids: HashSet<EntityId> = base
            .tasks
            .iter()
            .chain(edited_secondary.tasks.iter())
            .chain(edited_primary.tasks.iter())
            .map(|t| t.id.clone())
            .collect();
        for task in &canonical.tasks {
            prop_assert!(known_task_ids.contains(&task.id));
        }

        // Applying the same merged change-set again changes nothing.
        let mut again = canonical.clone();
        apply_changes(&mut again, &merged);
        prop_assert_eq!(canonical, again);
    }
}

// One worked example kept alongside the properties: the priority rule's
// observable outcome, stated concretely.
#[test]
fn primary_title_wins_a_conflicting_update() {
    use taskbridge_core::{Task, Update};

    let mut secondary = ChangeSet::new();
    secondary
        .tasks
        .updated
        .push(Update::new(Task::new("t1", "secondary title", "l1")));

    let mut primary = ChangeSet::new();
    primary
        .tasks
        .updated
        .push(Update::new(Task::new("t1", "primary title", "l1")));

    let merged = reconcile(&secondary, &primary);
    assert_eq!(merged.tasks.updated.len(), 1);
    assert_eq!(merged.tasks.updated[0].new_value.title, "primary title");
}
