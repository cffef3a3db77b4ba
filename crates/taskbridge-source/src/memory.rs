//! In-memory implementation of the SourceClient trait.
//!
//! This is primarily for testing. It behaves like a well-formed remote
//! service holding a task-list/task collection, with hooks to inject
//! fetch and per-entity push failures.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use taskbridge_core::{EntityId, SyncState, Task, TaskList};

use crate::error::{Result, SourceError};
use crate::traits::SourceClient;

/// In-memory source implementation.
///
/// All data is lost when the source is dropped. Thread-safe via RwLock.
pub struct MemorySource {
    name: String,
    state: RwLock<SyncState>,
    fail_fetch: AtomicBool,
    /// Ids whose push operations should fail.
    poisoned: RwLock<HashSet<EntityId>>,
}

impl MemorySource {
    /// Create an empty source with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_state(name, SyncState::new())
    }

    /// Create a source pre-seeded with remote state.
    pub fn with_state(name: impl Into<String>, state: SyncState) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(state),
            fail_fetch: AtomicBool::new(false),
            poisoned: RwLock::new(HashSet::new()),
        }
    }

    /// Replace the remote state wholesale, as if the service was edited
    /// out-of-band between cycles.
    pub fn set_state(&self, state: SyncState) {
        *self.state.write().unwrap() = state;
    }

    /// Inspect a copy of the current remote state.
    pub fn snapshot(&self) -> SyncState {
        self.state.read().unwrap().clone()
    }

    /// Make the next and all following fetches fail until cleared.
    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Make every push operation touching `id` fail until cleared.
    pub fn poison(&self, id: impl Into<EntityId>) {
        self.poisoned.write().unwrap().insert(id.into());
    }

    /// Clear all injected failures.
    pub fn heal(&self) {
        self.fail_fetch.store(false, Ordering::SeqCst);
        self.poisoned.write().unwrap().clear();
    }

    fn check_poisoned(&self, id: &EntityId) -> Result<()> {
        if self.poisoned.read().unwrap().contains(id) {
            return Err(SourceError::Unavailable(format!(
                "injected failure for {id}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl SourceClient for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_snapshot(&self) -> Result<SyncState> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable(format!(
                "injected fetch failure for {}",
                self.name
            )));
        }
        Ok(self.state.read().unwrap().clone())
    }

    async fn insert_list(&self, list: &TaskList) -> Result<()> {
        self.check_poisoned(&list.id)?;
        self.state.write().unwrap().upsert_task_list(list.clone());
        Ok(())
    }

    async fn update_list(&self, list: &TaskList) -> Result<()> {
        self.check_poisoned(&list.id)?;
        self.state.write().unwrap().upsert_task_list(list.clone());
        Ok(())
    }

    async fn delete_list(&self, id: &EntityId) -> Result<()> {
        self.check_poisoned(id)?;
        self.state.write().unwrap().remove_task_list(id);
        Ok(())
    }

    async fn insert_task(&self, task: &Task) -> Result<()> {
        self.check_poisoned(&task.id)?;
        self.state.write().unwrap().upsert_task(task.clone());
        Ok(())
    }

    async fn update_task(&self, task: &Task) -> Result<()> {
        self.check_poisoned(&task.id)?;
        self.state.write().unwrap().upsert_task(task.clone());
        Ok(())
    }

    async fn delete_task(&self, task: &Task) -> Result<()> {
        self.check_poisoned(&task.id)?;
        self.state.write().unwrap().remove_task(&task.id);
        Ok(())
    }
}
