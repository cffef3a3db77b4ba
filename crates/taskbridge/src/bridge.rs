//! The Bridge: unified entry point for two-way task synchronization.

use std::sync::Arc;

use taskbridge_core::SyncState;
use taskbridge_source::SourceClient;
use taskbridge_sync::{CycleReport, EngineConfig, Result, SyncEngine};

/// Two-way synchronization between a task-list API and a document
/// database.
///
/// The bridge owns the [`SyncEngine`] and with it the canonical snapshot.
/// The first type parameter is the primary source: the side whose edits
/// win every reconciliation conflict.
pub struct Bridge<P, S>
where
    P: SourceClient + 'static,
    S: SourceClient + 'static,
{
    engine: SyncEngine<P, S>,
}

impl<P, S> Bridge<P, S>
where
    P: SourceClient + 'static,
    S: SourceClient + 'static,
{
    /// Create a bridge over the two sources with an empty canonical
    /// baseline and default configuration.
    pub fn new(primary: Arc<P>, secondary: Arc<S>) -> Self {
        Self {
            engine: SyncEngine::new(primary, secondary),
        }
    }

    /// Builder-style engine configuration.
    pub fn with_config(self, config: EngineConfig) -> Self {
        Self {
            engine: self.engine.with_config(config),
        }
    }

    /// Seed the canonical baseline, e.g. from previously persisted state.
    pub fn with_canonical(self, state: SyncState) -> Self {
        Self {
            engine: self.engine.with_canonical(state),
        }
    }

    /// Run one sync cycle, queueing behind any cycle already in flight.
    pub async fn sync(&self) -> Result<CycleReport> {
        self.engine.run_cycle().await
    }

    /// Run one sync cycle, failing fast with
    /// [`SyncError::CycleInFlight`](taskbridge_sync::SyncError::CycleInFlight)
    /// if another is running.
    pub async fn try_sync(&self) -> Result<CycleReport> {
        self.engine.try_run_cycle().await
    }

    /// A copy of the current canonical snapshot, e.g. for persistence.
    pub async fn canonical_state(&self) -> SyncState {
        self.engine.canonical_state().await
    }

    /// Access the underlying engine.
    pub fn engine(&self) -> &SyncEngine<P, S> {
        &self.engine
    }
}
