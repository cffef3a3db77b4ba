//! Change-set reconciler: merge two change-sets under fixed priority.
//!
//! Both change-sets are computed against the same canonical baseline, one
//! per source. The primary source (the task-list API) wins every conflict;
//! the secondary source's conflicting operations are silently discarded.
//! Nothing is ever surfaced for manual resolution.

use taskbridge_core::{ChangeSet, Delta, Entity};

/// Merge one entity kind's deltas.
///
/// Every primary operation is copied into the result first,
/// unconditionally. A secondary operation survives only when the primary
/// did not touch the same id in *any* of its three buckets:
///
/// - secondary `updated`/`deleted` vs primary `updated` or `deleted`: the
///   primary already decided that entity's fate.
/// - secondary `added` vs primary `added`: both sides created the same
///   entity independently; the primary's creation wins.
/// - the remaining pairings (e.g. a secondary delete against a primary
///   add of the same id) cannot arise from two diffs against a shared
///   baseline, but change-sets of other provenance can produce them, and
///   letting both through would put one id in two buckets. The same
///   priority rule applies: the primary touched the id, so the secondary
///   entry is dropped.
///
/// Surviving secondary entries keep their original order, after the
/// primary's.
pub fn reconcile_deltas<E: Entity>(secondary: &Delta<E>, primary: &Delta<E>) -> Delta<E> {
    let mut merged = primary.clone();

    for update in &secondary.updated {
        if !primary.touches(&update.id) {
            merged.updated.push(update.clone());
        }
    }

    for deleted in &secondary.deleted {
        if !primary.touches(deleted) {
            merged.deleted.push(deleted.clone());
        }
    }

    for added in &secondary.added {
        if !primary.touches(added.entity_id()) {
            merged.added.push(added.clone());
        }
    }

    merged
}

/// Merge two full change-sets, primary source winning every conflict.
pub fn reconcile(secondary: &ChangeSet, primary: &ChangeSet) -> ChangeSet {
    ChangeSet {
        tasklists: reconcile_deltas(&secondary.tasklists, &primary.tasklists),
        tasks: reconcile_deltas(&secondary.tasks, &primary.tasks),
    }
}
