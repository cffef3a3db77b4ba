//! Cycle orchestrator: one full fetch → reconcile → push pass.
//!
//! The engine owns the canonical snapshot and runs the whole cycle while
//! holding its lock, so cycles are strictly serialized: overlapping
//! invocations queue behind [`SyncEngine::run_cycle`] or are rejected by
//! [`SyncEngine::try_run_cycle`]. Between the two fetches and within each
//! push bucket, work runs concurrently on the single orchestrator task.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use taskbridge_core::{check_references, SyncState};
use taskbridge_source::SourceClient;

use crate::apply::apply_changes;
use crate::diff::diff_snapshots;
use crate::error::{Result, SyncError};
use crate::push::{push_changes, PushReport};
use crate::reconcile::reconcile;

/// Configuration for engine behavior.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Whether to run referential checks on fetched snapshots and log the
    /// violations. Violations never fail a cycle; a dangling reference is
    /// legal while a partial sync is in flight.
    pub validate_snapshots: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            validate_snapshots: true,
        }
    }
}

/// Outcome of one sync cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// Operations folded into the canonical snapshot after reconciliation.
    pub reconciled: usize,
    /// Push outcome for the secondary (document-database) source.
    pub secondary_push: PushReport,
    /// Push outcome for the primary (task-list API) source.
    pub primary_push: PushReport,
}

impl CycleReport {
    /// Whether both pushes were fully acknowledged.
    pub fn is_clean(&self) -> bool {
        self.secondary_push.is_clean() && self.primary_push.is_clean()
    }
}

/// The sync engine: canonical state plus the two source clients.
///
/// The primary source wins every reconciliation conflict; the secondary
/// source's conflicting edits are discarded silently. Canonical state
/// lives in memory for the lifetime of the engine; persistence, if any,
/// belongs to the caller via [`SyncEngine::with_canonical`] and
/// [`SyncEngine::canonical_state`].
pub struct SyncEngine<P, S>
where
    P: SourceClient + 'static,
    S: SourceClient + 'static,
{
    primary: Arc<P>,
    secondary: Arc<S>,
    config: EngineConfig,
    canonical: Mutex<SyncState>,
}

impl<P, S> SyncEngine<P, S>
where
    P: SourceClient + 'static,
    S: SourceClient + 'static,
{
    /// Create an engine over the two sources with an empty canonical
    /// baseline.
    pub fn new(primary: Arc<P>, secondary: Arc<S>) -> Self {
        Self {
            primary,
            secondary,
            config: EngineConfig::default(),
            canonical: Mutex::new(SyncState::new()),
        }
    }

    /// Builder-style config override.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed the canonical baseline, e.g. from state a caller persisted.
    pub fn with_canonical(mut self, state: SyncState) -> Self {
        self.canonical = Mutex::new(state);
        self
    }

    /// A copy of the current canonical snapshot.
    ///
    /// Waits for any in-flight cycle to finish first.
    pub async fn canonical_state(&self) -> SyncState {
        self.canonical.lock().await.clone()
    }

    /// Run one sync cycle, queueing behind any cycle already in flight.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let guard = self.canonical.lock().await;
        self.cycle(guard).await
    }

    /// Run one sync cycle, failing fast if another is in flight.
    pub async fn try_run_cycle(&self) -> Result<CycleReport> {
        let guard = self
            .canonical
            .try_lock()
            .map_err(|_| SyncError::CycleInFlight)?;
        self.cycle(guard).await
    }

    async fn cycle(&self, mut canonical: MutexGuard<'_, SyncState>) -> Result<CycleReport> {
        // 1. Fetch both sides concurrently. Either failure aborts the
        //    cycle before anything is mutated or pushed.
        let (mut snap_secondary, mut snap_primary) = tokio::try_join!(
            fetch_from(&self.secondary),
            fetch_from(&self.primary),
        )?;

        if self.config.validate_snapshots {
            log_dangling(self.secondary.name(), &snap_secondary);
            log_dangling(self.primary.name(), &snap_primary);
        }

        // 2. Diff each side against the canonical baseline.
        let changes_secondary = diff_snapshots(&canonical, &snap_secondary);
        let changes_primary = diff_snapshots(&canonical, &snap_primary);
        tracing::debug!(
            "cycle diffs: {} ops from {}, {} ops from {}",
            changes_secondary.len(),
            self.secondary.name(),
            changes_primary.len(),
            self.primary.name(),
        );

        // 3.-4. Reconcile under primary priority and fold into canonical.
        let merged = reconcile(&changes_secondary, &changes_primary);
        apply_changes(&mut canonical, &merged);

        // 5. Work out what each side is missing relative to canonical.
        let to_secondary = diff_snapshots(&snap_secondary, &canonical);
        let to_primary = diff_snapshots(&snap_primary, &canonical);

        // 6. Push. Failures are absorbed per operation; the canonical
        //    state is final for this cycle regardless of push outcomes.
        let secondary_push =
            push_changes(&self.secondary, &mut snap_secondary, &to_secondary).await;
        let primary_push = push_changes(&self.primary, &mut snap_primary, &to_primary).await;

        let report = CycleReport {
            reconciled: merged.len(),
            secondary_push,
            primary_push,
        };
        tracing::info!(
            "cycle complete: {} ops reconciled, pushes {}:{}/{}/{} {}:{}/{}/{}",
            report.reconciled,
            report.secondary_push.source,
            report.secondary_push.pushed,
            report.secondary_push.failed,
            report.secondary_push.skipped,
            report.primary_push.source,
            report.primary_push.pushed,
            report.primary_push.failed,
            report.primary_push.skipped,
        );
        Ok(report)
    }
}

async fn fetch_from<C: SourceClient>(client: &Arc<C>) -> Result<SyncState> {
    client
        .fetch_snapshot()
        .await
        .map_err(|err| SyncError::Fetch {
            source: client.name().to_string(),
            err,
        })
}

fn log_dangling(source: &str, snapshot: &SyncState) {
    for dangling in check_references(snapshot) {
        tracing::warn!(
            "{}: task {} references missing list {}",
            source,
            dangling.task_id,
            dangling.task_list_id,
        );
    }
}
