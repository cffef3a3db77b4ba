//! # Taskbridge Source
//!
//! The adapter boundary between the reconciliation core and the two
//! external services.
//!
//! ## Overview
//!
//! The core never talks to a service directly; it goes through the
//! [`SourceClient`] trait, which exposes an atomic snapshot fetch plus one
//! method per push operation. Real deployments implement the trait over
//! the vendor APIs; this crate ships two in-memory implementations:
//!
//! - [`MemorySource`] - a plain task-list service fake with failure
//!   injection, the workhorse of the engine tests
//! - [`DocumentSource`] - a page-based document database emulation that
//!   owns its page-id ↔ entity-id mapping and archival semantics
//!
//! ## Design Notes
//!
//! - **Atomic fetch**: a snapshot is fully materialized or the fetch
//!   fails; partial state never escapes an adapter.
//! - **Typed boundary**: property bags and page records stay inside the
//!   adapter. Only canonical `TaskList` / `Task` / `SyncState` shapes
//!   cross into the core.

pub mod error;
pub mod memory;
pub mod pages;
pub mod traits;

pub use error::{Result, SourceError};
pub use memory::MemorySource;
pub use pages::{DocumentSource, ListPage, PageId, TaskPage};
pub use traits::SourceClient;
