//! Display formatting for a completed sync.
//!
//! Renders the stored instant into the viewer's timezone for display.
//! Formatting is pure: the stored instant is an absolute point in time and
//! is never mutated, only projected. Unparseable timestamps can never reach
//! this module; they are rejected as protocol errors before a
//! [`SyncReport`] is constructed.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt;
use sync_types::SyncReport;

/// Display format: abbreviated month, numeric day, numeric year, then a
/// 12-hour clock with two-digit minutes and an AM/PM marker.
/// Example: `Mar 5, 2024 10:07 AM`.
const COMPLETED_AT_FORMAT: &str = "%b %-d, %Y %-I:%M %p";

/// Render a completion instant in the local timezone.
pub fn completed_at_display(instant: DateTime<Utc>) -> String {
    completed_at_display_in(instant, &Local)
}

/// Render a completion instant in an explicit timezone.
///
/// Deterministic for a fixed instant and zone; used directly by tests and
/// by callers that render for a viewer in a known zone.
pub fn completed_at_display_in<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    instant
        .with_timezone(tz)
        .format(COMPLETED_AT_FORMAT)
        .to_string()
}

/// The processed email count as a plain integer.
pub fn processed_emails_display(report: &SyncReport) -> String {
    report.processed_emails.to_string()
}

/// The success confirmation line shown after a completed sync.
pub fn success_summary(report: &SyncReport) -> String {
    format!(
        "{} emails have been synced to your Google Sheet.",
        report.processed_emails
    )
}
