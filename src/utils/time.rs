//! Time utilities: duration formatting, RFC 3339 timestamps, wall-clock display.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local};

/// Format a count of seconds as `HH:MM:SS`.
///
/// Hours are zero-padded to two digits and are not capped, so long totals
/// render as e.g. `123:04:05`. Negative input is clamped to zero.
pub fn format_hms(seconds: i64) -> String {
    let s = seconds.max(0);
    format!("{:02}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
}

/// Parse an RFC 3339 timestamp and convert it to local time.
pub fn parse_timestamp(s: &str) -> AppResult<DateTime<Local>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

pub fn parse_optional_timestamp(input: Option<&String>) -> AppResult<Option<DateTime<Local>>> {
    if let Some(s) = input {
        Ok(Some(parse_timestamp(s)?))
    } else {
        Ok(None)
    }
}

/// `HH:MM` of a timestamp, or `--:--` when missing.
pub fn clock_or_placeholder(ts: Option<&DateTime<Local>>) -> String {
    ts.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}
