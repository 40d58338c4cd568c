//! Timestamp parsing and the wire format expected by the risk service.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

/// Layout of every `time` field in an emitted reference index (UTC, no offset).
pub const WIRE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Raised when a timestamp cannot be interpreted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("timestamp is empty")]
    Empty,
    #[error("unix timestamp {0} is out of range")]
    OutOfRange(i64),
    #[error("unrecognized timestamp '{0}'")]
    Unrecognized(String),
}

/// Format a timestamp the way the consuming service expects it.
pub fn format_wire_time(ts: DateTime<Utc>) -> String {
    ts.format(WIRE_TIME_FORMAT).to_string()
}

/// Parse RFC 3339, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD` or unix milliseconds.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(TimeParseError::Empty);
    }
    if let Ok(millis) = raw.parse::<i64>() {
        return Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or(TimeParseError::OutOfRange(millis));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, WIRE_TIME_FORMAT) {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    Err(TimeParseError::Unrecognized(raw.to_string()))
}
