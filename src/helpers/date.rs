//! Timestamp helpers
//!
//! Post and category timestamps are stored as strings so that whatever a
//! front-matter block holds survives a rewrite untouched. These helpers
//! produce new timestamps and turn stored ones back into instants for sorting.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Current time as an ISO 8601 string with millisecond precision
///
/// # Examples
/// ```ignore
/// now_iso() // -> "2024-01-15T10:30:00.000Z"
/// ```
pub fn now_iso() -> String {
    iso(&Utc::now())
}

/// Format an instant the way `now_iso` does
pub fn iso(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp in any of the common formats
///
/// Values without an offset are read as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let offset_formats = ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"];
    for fmt in offset_formats {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let naive_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
    ];
    for fmt in naive_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}

/// Format a stored timestamp as a plain date, falling back to the raw value
pub fn short_date(s: &str) -> String {
    parse_timestamp(s)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| s.to_string())
}
