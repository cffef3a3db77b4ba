//! Test fixtures and helpers.
//!
//! Common setup code for engine and integration tests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use taskbridge_core::{SyncState, Task, TaskList, TaskStatus};
use taskbridge_source::MemorySource;
use taskbridge_sync::SyncEngine;

/// Build a task list fixture.
pub fn list(id: &str, title: &str) -> TaskList {
    TaskList::new(id, title)
}

/// Build a pending task fixture.
pub fn task(id: &str, title: &str, list_id: &str) -> Task {
    Task::new(id, title, list_id)
}

/// Build a completed task fixture.
pub fn done_task(id: &str, title: &str, list_id: &str) -> Task {
    Task::new(id, title, list_id).with_status(TaskStatus::Completed)
}

/// Parse an RFC 3339 timestamp, panicking on bad test input.
pub fn at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("fixture timestamp must be RFC 3339")
        .with_timezone(&Utc)
}

/// Assemble a snapshot from fixture entities.
pub fn snapshot(tasklists: Vec<TaskList>, tasks: Vec<Task>) -> SyncState {
    SyncState { tasklists, tasks }
}

/// A two-source test rig: one in-memory source per side plus an engine
/// wired over them, with the task-API side as the primary.
pub struct TwoSourceFixture {
    /// The priority side, standing in for the task-list API.
    pub tasks_api: Arc<MemorySource>,
    /// The secondary side, standing in for the document database.
    pub doc_db: Arc<MemorySource>,
    /// Engine over the two, empty canonical baseline.
    pub engine: SyncEngine<MemorySource, MemorySource>,
}

impl TwoSourceFixture {
    /// Create a rig with both remotes empty.
    pub fn new() -> Self {
        Self::with_states(SyncState::new(), SyncState::new())
    }

    /// Create a rig with seeded remote states.
    pub fn with_states(tasks_api_state: SyncState, doc_db_state: SyncState) -> Self {
        let tasks_api = Arc::new(MemorySource::with_state("tasks-api", tasks_api_state));
        let doc_db = Arc::new(MemorySource::with_state("doc-db", doc_db_state));
        let engine = SyncEngine::new(Arc::clone(&tasks_api), Arc::clone(&doc_db));
        Self {
            tasks_api,
            doc_db,
            engine,
        }
    }
}

impl Default for TwoSourceFixture {
    fn default() -> Self {
        Self::new()
    }
}
