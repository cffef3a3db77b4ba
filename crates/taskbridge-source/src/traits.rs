//! SourceClient trait: the abstract interface to one external service.
//!
//! This trait is the core's entire view of a source. Implementations wrap
//! a real API (task-list service, document database) or an in-memory fake
//! for tests; whatever representation the service uses internally, only
//! canonical [`SyncState`] / [`Task`] / [`TaskList`] shapes cross this
//! boundary.

use async_trait::async_trait;
use taskbridge_core::{EntityId, SyncState, Task, TaskList};

use crate::error::Result;

/// The async interface to one external source.
///
/// # Design Notes
///
/// - **Atomic fetch**: `fetch_snapshot` returns the fully materialized
///   state of the source or fails; partial pages never escape an adapter.
/// - **Per-operation push**: each mutation addresses one entity. The push
///   driver calls them concurrently within a bucket, so implementations
///   must tolerate interleaving between independent ids.
/// - **Id mapping is adapter-owned**: if the service keys records by its
///   own ids (page ids, record ids), the adapter maintains that mapping
///   internally; the trait only ever speaks canonical entity ids.
#[async_trait]
pub trait SourceClient: Send + Sync {
    /// Short human-readable name for logs and reports.
    fn name(&self) -> &str;

    /// Fetch the full current state of this source.
    async fn fetch_snapshot(&self) -> Result<SyncState>;

    // ─────────────────────────────────────────────────────────────────────
    // Task-list operations
    // ─────────────────────────────────────────────────────────────────────

    /// Create a task list on the remote side.
    async fn insert_list(&self, list: &TaskList) -> Result<()>;

    /// Replace an existing task list on the remote side.
    async fn update_list(&self, list: &TaskList) -> Result<()>;

    /// Delete a task list by id.
    async fn delete_list(&self, id: &EntityId) -> Result<()>;

    // ─────────────────────────────────────────────────────────────────────
    // Task operations
    // ─────────────────────────────────────────────────────────────────────

    /// Create a task on the remote side.
    async fn insert_task(&self, task: &Task) -> Result<()>;

    /// Replace an existing task on the remote side.
    async fn update_task(&self, task: &Task) -> Result<()>;

    /// Delete a task.
    ///
    /// Takes the full task rather than an id: addressing a task remotely
    /// requires its owning list.
    async fn delete_task(&self, task: &Task) -> Result<()>;
}
