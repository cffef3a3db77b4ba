//! # Taskbridge
//!
//! Two-way synchronization of tasks and task lists between a task-list
//! API and a document database, reconciled into one canonical state.
//!
//! ## Overview
//!
//! Each sync cycle fetches a full snapshot from both sources, diffs each
//! against the canonical snapshot, merges the two change-sets under fixed
//! priority (the task-list API always wins a conflict), folds the result
//! into canonical state, and pushes each side the operations it is
//! missing.
//!
//! ## Key Concepts
//!
//! - **Snapshot**: the full state of one side at one point in time.
//!   Fetches are atomic; partial state never enters a cycle.
//! - **Change-set**: added / updated / deleted operations per entity
//!   kind, with any id in at most one bucket.
//! - **Priority**: conflicts are resolved silently and deterministically;
//!   nothing is surfaced for manual resolution.
//! - **Self-healing**: failed pushes are not retried inside a cycle; the
//!   next cycle's diff rediscovers the divergence.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskbridge::{Bridge, DocumentSource, MemorySource};
//!
//! async fn example() {
//!     // Real deployments implement SourceClient over the vendor APIs;
//!     // the in-memory sources stand in for them here.
//!     let tasks_api = Arc::new(MemorySource::new("tasks-api"));
//!     let doc_db = Arc::new(DocumentSource::new("doc-db"));
//!
//!     let bridge = Bridge::new(tasks_api, doc_db);
//!     let report = bridge.sync().await.unwrap();
//!     println!("reconciled {} operations", report.reconciled);
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `taskbridge::core` - the data model (snapshots, change-sets)
//! - `taskbridge::source` - the source adapter boundary
//! - `taskbridge::sync` - diffing, reconciliation, and the engine

pub mod bridge;

// Re-export component crates
pub use taskbridge_core as core;
pub use taskbridge_source as source;
pub use taskbridge_sync as sync;

// Re-export main types for convenience
pub use bridge::Bridge;
pub use taskbridge_core::{
    ChangeSet, Delta, Entity, EntityId, SyncState, Task, TaskList, TaskStatus, Update,
};
pub use taskbridge_source::{DocumentSource, MemorySource, SourceClient, SourceError};
pub use taskbridge_sync::{
    CycleReport, EngineConfig, PushReport, Result, SyncEngine, SyncError,
};
