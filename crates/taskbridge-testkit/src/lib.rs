//! # Taskbridge Testkit
//!
//! Testing utilities for taskbridge.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: entity builders and a two-source engine rig for quick
//!   scenario setup
//! - **Generators**: proptest strategies for snapshots and entities
//!
//! The property tests over the reconciliation core live in this crate's
//! `tests/` directory and lean on both.
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use taskbridge_sync::diff_snapshots;
//! use taskbridge_testkit::generators::sync_state;
//!
//! proptest! {
//!     #[test]
//!     fn self_diff_is_empty(state in sync_state()) {
//!         prop_assert!(diff_snapshots(&state, &state).is_empty());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{at, done_task, list, snapshot, task, TwoSourceFixture};
