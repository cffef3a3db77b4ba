//! Error types for the core data model.

use thiserror::Error;

/// Errors that can occur while constructing model values from raw source
/// data.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A status string that is neither `needsAction` nor `completed`.
    #[error("unknown task status: {0}")]
    UnknownStatus(String),
}
