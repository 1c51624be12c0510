//! Protocol error types for mailsheet-sync.

use thiserror::Error;

/// Violations of the sync endpoint response contract.
///
/// A well-formed HTTP response can still fail these checks; the controller
/// collapses every variant into the `Failed` state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The outcome field was present but not the success literal.
    #[error("sync endpoint reported outcome {outcome:?}")]
    NonSuccessOutcome {
        /// The outcome value the endpoint returned.
        outcome: String,
        /// Server-provided error reason, if any. Logged for diagnostics,
        /// never surfaced in exposed state.
        message: Option<String>,
    },

    /// Success response without a processed email count.
    #[error("success response is missing the processed email count")]
    MissingCount,

    /// Success response without a completion timestamp.
    #[error("success response is missing the completion timestamp")]
    MissingTimestamp,

    /// Completion timestamp could not be parsed into an absolute instant.
    #[error("unparseable completion timestamp: {0}")]
    InvalidTimestamp(String),
}
