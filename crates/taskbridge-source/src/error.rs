//! Error types for source adapters.

use thiserror::Error;

/// Errors that can occur while talking to a source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be reached or refused the operation.
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// The remote side has no record matching the operation's target.
    #[error("{kind} not found on remote: {id}")]
    NotFound {
        /// What kind of record was being addressed (list, task, page).
        kind: &'static str,
        /// The id that failed to resolve.
        id: String,
    },

    /// The remote returned data the adapter could not map into the
    /// canonical model.
    #[error("malformed source data: {0}")]
    Malformed(String),
}

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
