//! # Taskbridge Core
//!
//! Pure data model for the taskbridge sync engine: tasks, task lists,
//! snapshots, and change-sets.
//!
//! This crate contains no I/O, no async, no networking. It is pure
//! computation over the canonical shapes both sources are mapped into.
//!
//! ## Key Types
//!
//! - [`Task`] / [`TaskList`] - The two synchronized entity kinds
//! - [`SyncState`] - A full snapshot of one side at one point in time
//! - [`ChangeSet`] / [`Delta`] - Additions, updates, and deletions between
//!   two snapshots
//! - [`Entity`] - The trait an entity kind implements to participate in
//!   diffing (id lookup plus the change predicate)
//!
//! ## Change predicate
//!
//! `Entity::content_eq` is deliberately narrower than `PartialEq`: only
//! synchronized fields participate, and due dates compare by calendar day.
//! See [`task::same_calendar_day`].

pub mod changes;
pub mod error;
pub mod state;
pub mod task;
pub mod types;
pub mod validation;

pub use changes::{ChangeSet, Delta, Entity, Update};
pub use error::CoreError;
pub use state::SyncState;
pub use task::{same_calendar_day, Task, TaskList};
pub use types::{EntityId, TaskStatus};
pub use validation::{check_references, DanglingTask};
