//! # Taskbridge Sync
//!
//! The state reconciliation core: diff two snapshots, merge concurrent
//! edit streams under fixed priority, fold the result into canonical
//! state, and drive the per-source pushes.
//!
//! ## Overview
//!
//! One sync cycle moves data like this:
//!
//! ```text
//!   tasks API  ──fetch──┐                         ┌──push── tasks API
//!                       ├─ diff vs canonical ─┐   │
//!   doc DB    ──fetch──┘                      │   │
//!                                        reconcile│
//!                                             │   │
//!                       canonical ←─ apply ───┘   │
//!                       canonical ── re-diff ─────┴──push── doc DB
//! ```
//!
//! ## Key Properties
//!
//! - **Deterministic**: diffing and reconciliation are pure functions of
//!   their inputs.
//! - **Priority-resolved**: the task-list API wins every conflict; the
//!   document side's conflicting edits are silently discarded.
//! - **Self-healing**: a failed push leaves that entity stale on one
//!   side; the next cycle's diff rediscovers and retries it.
//! - **Serialized cycles**: the canonical snapshot is guarded by a lock
//!   held for the whole cycle; overlapping triggers queue or are
//!   rejected, never interleaved.

pub mod apply;
pub mod diff;
pub mod engine;
pub mod error;
pub mod push;
pub mod reconcile;

pub use apply::{apply_changes, apply_delta};
pub use diff::{diff_entities, diff_snapshots};
pub use engine::{CycleReport, EngineConfig, SyncEngine};
pub use error::{Result, SyncError};
pub use push::{push_changes, PushReport};
pub use reconcile::{reconcile, reconcile_deltas};
