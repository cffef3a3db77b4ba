//! Error types for the sync engine.

use taskbridge_source::SourceError;
use thiserror::Error;

/// Errors that can occur while running a sync cycle.
///
/// A failed snapshot fetch is the only condition fatal to a cycle; push
/// failures are absorbed per operation and reported through the cycle
/// report instead.
#[derive(Debug, Error)]
pub enum SyncError {
    /// One of the two snapshot fetches failed; the cycle was aborted
    /// before any state was mutated.
    #[error("fetch from {source} failed: {err}")]
    Fetch {
        /// Name of the source whose fetch failed.
        source: String,
        /// The underlying adapter error.
        #[source]
        err: SourceError,
    },

    /// A cycle was requested while another one is in flight.
    #[error("a sync cycle is already in flight")]
    CycleInFlight,
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
