//! Snapshot comparator: compute the change-set between two snapshots.

use std::collections::{HashMap, HashSet};

use taskbridge_core::{ChangeSet, Delta, Entity, EntityId, SyncState, Update};

/// Compute the delta from `old` to `new` for one entity kind.
///
/// - Present in `new` but not `old` → `added`
/// - Present in both with differing synchronized content → `updated`,
///   carrying `new`'s whole value
/// - Present in `old` but not `new` → `deleted`, by id
///
/// Deterministic given its inputs and free of side effects. Entities keep
/// the order they have in the input snapshots.
pub fn diff_entities<E: Entity>(old: &[E], new: &[E]) -> Delta<E> {
    let old_by_id: HashMap<&EntityId, &E> =
        old.iter().map(|e| (e.entity_id(), e)).collect();
    let new_ids: HashSet<&EntityId> = new.iter().map(|e| e.entity_id()).collect();

    let mut delta = Delta::new();

    for entity in new {
        match old_by_id.get(entity.entity_id()) {
            None => delta.added.push(entity.clone()),
            Some(prev) if !prev.content_eq(entity) => {
                delta.updated.push(Update::new(entity.clone()));
            }
            Some(_) => {}
        }
    }

    for entity in old {
        if !new_ids.contains(entity.entity_id()) {
            delta.deleted.push(entity.entity_id().clone());
        }
    }

    delta
}

/// Compute the full change-set from `old` to `new`, both entity kinds.
pub fn diff_snapshots(old: &SyncState, new: &SyncState) -> ChangeSet {
    ChangeSet {
        tasklists: diff_entities(&old.tasklists, &new.tasklists),
        tasks: diff_entities(&old.tasks, &new.tasks),
    }
}
