//! Normalized sync outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The outcome of a successful sync run.
///
/// Constructed only from a validated success response
/// ([`crate::SyncResponse::into_report`]); immutable once created and
/// replaced wholesale by the next successful sync, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Number of emails the endpoint processed in this run.
    pub processed_emails: u64,
    /// When the run completed, as an absolute instant.
    ///
    /// Always stored parsed, never as the raw wire string, so re-formatting
    /// into any timezone stays correct.
    pub completed_at: DateTime<Utc>,
}
