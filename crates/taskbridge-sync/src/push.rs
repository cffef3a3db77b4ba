//! Push driver: dispatch a change-set to one source.
//!
//! The driver walks the change-set bucket by bucket, lists before tasks
//! and added → updated → deleted within each kind, so a freshly created
//! list exists remotely before the tasks that reference it arrive. All
//! operations inside one bucket are dispatched concurrently; the driver
//! waits for the whole bucket to settle before moving on.
//!
//! A failed operation is logged and counted, never escalated: the
//! canonical state was already updated optimistically, and the next
//! cycle's diff rediscovers the divergence and re-converges the sides.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinSet;

use taskbridge_core::{ChangeSet, EntityId, SyncState};
use taskbridge_source::{SourceClient, SourceError};

/// Outcome counts for one source's push.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushReport {
    /// Name of the source that was pushed to.
    pub source: String,
    /// Operations acknowledged by the remote side.
    pub pushed: usize,
    /// Operations the remote side rejected or could not be reached for.
    pub failed: usize,
    /// Operations skipped because their target could not be resolved.
    pub skipped: usize,
}

impl PushReport {
    fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            ..Self::default()
        }
    }

    /// Whether every operation was acknowledged.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }

    fn note_err(&mut self, op: &'static str, id: &EntityId, err: &SourceError) {
        match err {
            SourceError::NotFound { .. } => {
                tracing::warn!("{}: {} {} skipped: {}", self.source, op, id, err);
                self.skipped += 1;
            }
            _ => {
                tracing::warn!("{}: {} {} failed: {}", self.source, op, id, err);
                self.failed += 1;
            }
        }
    }
}

/// Dispatch every item of one bucket concurrently and collect the
/// outcomes. One item's failure never cancels its siblings.
async fn dispatch_bucket<T, F, Fut>(items: Vec<T>, op: F) -> Vec<(T, Result<(), SourceError>)>
where
    T: Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = (T, Result<(), SourceError>)> + Send + 'static,
{
    let mut set = JoinSet::new();
    for item in items {
        set.spawn(op(item));
    }

    let mut outcomes = Vec::with_capacity(set.len());
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            // A panicked push task loses its outcome; the entity stays
            // stale locally until the next cycle's diff picks it up.
            Err(err) => tracing::error!("push task did not complete: {}", err),
        }
    }
    outcomes
}

/// Push `changes` to `client`, folding each acknowledged operation into
/// the local `snapshot` copy so it mirrors what the remote side now holds.
///
/// Failed or skipped operations leave their entity's local copy stale on
/// purpose; the divergence is rediscovered by the next cycle's diff.
pub async fn push_changes<C>(
    client: &Arc<C>,
    snapshot: &mut SyncState,
    changes: &ChangeSet,
) -> PushReport
where
    C: SourceClient + 'static,
{
    let mut report = PushReport::new(client.name());

    // Task lists first: tasks pushed later may reference them.
    let outcomes = dispatch_bucket(changes.tasklists.added.clone(), |list| {
        let client = Arc::clone(client);
        async move {
            let res = client.insert_list(&list).await;
            (list, res)
        }
    })
    .await;
    for (list, res) in outcomes {
        match res {
            Ok(()) => {
                snapshot.upsert_task_list(list);
                report.pushed += 1;
            }
            Err(err) => report.note_err("insert list", &list.id, &err),
        }
    }

    let outcomes = dispatch_bucket(changes.tasklists.updated.clone(), |update| {
        let client = Arc::clone(client);
        async move {
            let res = client.update_list(&update.new_value).await;
            (update, res)
        }
    })
    .await;
    for (update, res) in outcomes {
        match res {
            Ok(()) => {
                snapshot.upsert_task_list(update.new_value);
                report.pushed += 1;
            }
            Err(err) => report.note_err("update list", &update.id, &err),
        }
    }

    let outcomes = dispatch_bucket(changes.tasklists.deleted.clone(), |id| {
        let client = Arc::clone(client);
        async move {
            let res = client.delete_list(&id).await;
            (id, res)
        }
    })
    .await;
    for (id, res) in outcomes {
        match res {
            Ok(()) => {
                snapshot.remove_task_list(&id);
                report.pushed += 1;
            }
            Err(err) => report.note_err("delete list", &id, &err),
        }
    }

    // Tasks.
    let outcomes = dispatch_bucket(changes.tasks.added.clone(), |task| {
        let client = Arc::clone(client);
        async move {
            let res = client.insert_task(&task).await;
            (task, res)
        }
    })
    .await;
    for (task, res) in outcomes {
        match res {
            Ok(()) => {
                snapshot.upsert_task(task);
                report.pushed += 1;
            }
            Err(err) => report.note_err("insert task", &task.id, &err),
        }
    }

    let outcomes = dispatch_bucket(changes.tasks.updated.clone(), |update| {
        let client = Arc::clone(client);
        async move {
            let res = client.update_task(&update.new_value).await;
            (update, res)
        }
    })
    .await;
    for (update, res) in outcomes {
        match res {
            Ok(()) => {
                snapshot.upsert_task(update.new_value);
                report.pushed += 1;
            }
            Err(err) => report.note_err("update task", &update.id, &err),
        }
    }

    // Deleting a task remotely needs the full task (the owning list id),
    // so unresolvable ids are skipped before dispatch.
    let mut to_delete = Vec::new();
    for id in &changes.tasks.deleted {
        match snapshot.task(id) {
            Some(task) => to_delete.push(task.clone()),
            None => {
                tracing::warn!(
                    "{}: delete task {} skipped: not in local snapshot",
                    report.source,
                    id
                );
                report.skipped += 1;
            }
        }
    }
    let outcomes = dispatch_bucket(to_delete, |task| {
        let client = Arc::clone(client);
        async move {
            let res = client.delete_task(&task).await;
            (task, res)
        }
    })
    .await;
    for (task, res) in outcomes {
        match res {
            Ok(()) => {
                snapshot.remove_task(&task.id);
                report.pushed += 1;
            }
            Err(err) => report.note_err("delete task", &task.id, &err),
        }
    }

    report
}
