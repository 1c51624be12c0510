//! Raw sync endpoint response body.
//!
//! The endpoint replies with JSON shaped like
//! `{"status": "success", "processed_emails": 17, "timestamp": "..."}` on
//! success and `{"status": "error", "message": "...", "processed_emails": 0}`
//! on an application-level failure. [`SyncResponse`] deserializes both
//! shapes; [`SyncResponse::into_report`] applies the success-path checks.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{ProtocolError, SyncReport};

/// The outcome literal the endpoint uses for a successful run.
pub const OUTCOME_SUCCESS: &str = "success";

/// A sync completion timestamp as it appears on the wire.
///
/// The endpoint may send either an epoch-milliseconds integer or ISO-8601
/// text. Text without an offset is treated as UTC (the reference backend
/// emits naive UTC timestamps).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Milliseconds since the UNIX epoch.
    EpochMillis(i64),
    /// ISO-8601 text, with or without an offset.
    Text(String),
}

impl Timestamp {
    /// Parse into an absolute instant.
    pub fn parse(&self) -> Result<DateTime<Utc>, ProtocolError> {
        match self {
            Timestamp::EpochMillis(ms) => Utc
                .timestamp_millis_opt(*ms)
                .single()
                .ok_or_else(|| ProtocolError::InvalidTimestamp(ms.to_string())),
            Timestamp::Text(text) => parse_iso8601(text),
        }
    }
}

/// Parse ISO-8601 text, accepting an explicit offset or a naive UTC value.
fn parse_iso8601(text: &str) -> Result<DateTime<Utc>, ProtocolError> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(text) {
        return Ok(with_offset.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| ProtocolError::InvalidTimestamp(text.to_string()))
}

/// The raw JSON body returned by the sync endpoint.
///
/// All payload fields are optional at the wire level so that error bodies
/// (which omit the timestamp) still deserialize and their `message` can be
/// logged. Presence is enforced by [`SyncResponse::into_report`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResponse {
    /// Outcome field; `"success"` indicates a successful run.
    #[serde(rename = "status")]
    pub outcome: String,

    /// Number of emails processed. Non-negative by type; a negative wire
    /// value fails deserialization outright.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_emails: Option<u64>,

    /// Completion instant of the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,

    /// Server-provided error reason, present on error outcomes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SyncResponse {
    /// Build a success response (test/mock convenience).
    pub fn success(processed_emails: u64, timestamp: Timestamp) -> Self {
        Self {
            outcome: OUTCOME_SUCCESS.to_string(),
            processed_emails: Some(processed_emails),
            timestamp: Some(timestamp),
            message: None,
        }
    }

    /// Build an error response (test/mock convenience).
    pub fn error(message: &str) -> Self {
        Self {
            outcome: "error".to_string(),
            processed_emails: Some(0),
            timestamp: None,
            message: Some(message.to_string()),
        }
    }

    /// Validate the success path and normalize into a [`SyncReport`].
    ///
    /// Checks, in order: the outcome literal, presence of the count,
    /// presence of the timestamp, and that the timestamp parses into an
    /// absolute instant. Rejecting unparseable timestamps here is what
    /// guarantees the formatter can never fail later.
    pub fn into_report(self) -> Result<SyncReport, ProtocolError> {
        if self.outcome != OUTCOME_SUCCESS {
            return Err(ProtocolError::NonSuccessOutcome {
                outcome: self.outcome,
                message: self.message,
            });
        }
        let processed_emails = self.processed_emails.ok_or(ProtocolError::MissingCount)?;
        let timestamp = self.timestamp.ok_or(ProtocolError::MissingTimestamp)?;
        let completed_at = timestamp.parse()?;
        Ok(SyncReport {
            processed_emails,
            completed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // Deserialization Tests
    // ===========================================

    #[test]
    fn success_body_deserializes() {
        let body = r#"{"status":"success","processed_emails":17,"timestamp":"2024-03-05T15:07:21.123456"}"#;
        let response: SyncResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.outcome, OUTCOME_SUCCESS);
        assert_eq!(response.processed_emails, Some(17));
        assert!(matches!(response.timestamp, Some(Timestamp::Text(_))));
    }

    #[test]
    fn error_body_deserializes_without_timestamp() {
        let body = r#"{"status":"error","message":"credentials expired","processed_emails":0}"#;
        let response: SyncResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.outcome, "error");
        assert_eq!(response.message.as_deref(), Some("credentials expired"));
        assert!(response.timestamp.is_none());
    }

    #[test]
    fn epoch_millis_timestamp_deserializes_as_integer() {
        let body = r#"{"status":"success","processed_emails":3,"timestamp":1709651241000}"#;
        let response: SyncResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.timestamp,
            Some(Timestamp::EpochMillis(1709651241000))
        );
    }

    #[test]
    fn negative_count_is_rejected_at_deserialization() {
        let body = r#"{"status":"success","processed_emails":-1,"timestamp":0}"#;
        assert!(serde_json::from_str::<SyncResponse>(body).is_err());
    }

    // ===========================================
    // Timestamp Parsing Tests
    // ===========================================

    #[test]
    fn parses_rfc3339_with_offset() {
        let ts = Timestamp::Text("2024-03-05T10:07:21-05:00".to_string());
        let instant = ts.parse().unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 3, 5, 15, 7, 21).unwrap());
    }

    #[test]
    fn parses_naive_text_as_utc() {
        let ts = Timestamp::Text("2024-03-05T15:07:21.500".to_string());
        let instant = ts.parse().unwrap();
        assert_eq!(instant.timestamp(), 1709651241);
        assert_eq!(instant.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn parses_epoch_millis() {
        let ts = Timestamp::EpochMillis(1709651241000);
        let instant = ts.parse().unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2024, 3, 5, 15, 7, 21).unwrap());
    }

    #[test]
    fn rejects_garbage_text() {
        let ts = Timestamp::Text("yesterday-ish".to_string());
        assert!(matches!(
            ts.parse(),
            Err(ProtocolError::InvalidTimestamp(_))
        ));
    }

    // ===========================================
    // Success-Path Validation Tests
    // ===========================================

    #[test]
    fn valid_success_response_normalizes() {
        let response = SyncResponse::success(17, Timestamp::EpochMillis(1709651241000));
        let report = response.into_report().unwrap();
        assert_eq!(report.processed_emails, 17);
        assert_eq!(
            report.completed_at,
            Utc.with_ymd_and_hms(2024, 3, 5, 15, 7, 21).unwrap()
        );
    }

    #[test]
    fn non_success_outcome_is_rejected_with_message() {
        let response = SyncResponse::error("quota exceeded");
        match response.into_report() {
            Err(ProtocolError::NonSuccessOutcome { outcome, message }) => {
                assert_eq!(outcome, "error");
                assert_eq!(message.as_deref(), Some("quota exceeded"));
            }
            other => panic!("expected NonSuccessOutcome, got {:?}", other),
        }
    }

    #[test]
    fn missing_count_is_rejected() {
        let response = SyncResponse {
            outcome: OUTCOME_SUCCESS.to_string(),
            processed_emails: None,
            timestamp: Some(Timestamp::EpochMillis(0)),
            message: None,
        };
        assert_eq!(response.into_report(), Err(ProtocolError::MissingCount));
    }

    #[test]
    fn missing_timestamp_is_rejected() {
        let response = SyncResponse {
            outcome: OUTCOME_SUCCESS.to_string(),
            processed_emails: Some(5),
            timestamp: None,
            message: None,
        };
        assert_eq!(response.into_report(), Err(ProtocolError::MissingTimestamp));
    }

    #[test]
    fn unparseable_timestamp_is_demoted_to_protocol_error() {
        let response = SyncResponse::success(5, Timestamp::Text("not-a-date".to_string()));
        assert!(matches!(
            response.into_report(),
            Err(ProtocolError::InvalidTimestamp(_))
        ));
    }
}
