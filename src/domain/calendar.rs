/// Calendar utilities for canonical local-date keys
///
/// Every date in the system is a local calendar day. Persisted blobs and the
/// CSV export key days as zero-padded `YYYY-MM-DD` strings, which makes
/// lexicographic string comparison equivalent to chronological order.

use std::cmp::Ordering;

use chrono::{Duration, Local, NaiveDate};

use crate::domain::DomainError;

/// Canonical key format shared by persistence and export
pub const KEY_FORMAT: &str = "%Y-%m-%d";

/// The device-local calendar date (not UTC)
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Today's canonical date key, e.g. "2024-01-02"
pub fn today_key() -> String {
    format_key(today())
}

/// Shift a date by `n` calendar days (`n` may be negative)
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date + Duration::days(n)
}

/// Format a date as its canonical zero-padded key
pub fn format_key(date: NaiveDate) -> String {
    date.format(KEY_FORMAT).to_string()
}

/// Parse a canonical date key back into a calendar date
pub fn parse_key(key: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(key, KEY_FORMAT)
        .map_err(|_| DomainError::InvalidDateKey(key.to_string()))
}

/// Compare two date keys chronologically.
///
/// Plain byte comparison is correct because keys are zero-padded ISO dates.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}
