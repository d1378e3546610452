//! Due date parsing and display formatting.

use std::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Display pattern used when none is configured: `Jan 05, 2025`.
pub const DEFAULT_DATE_FORMAT: &str = "%b %d, %Y";

const DATE_FORMATS: [&str; 1] = ["%Y-%m-%d"];
const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a raw due date as typed into the form.
///
/// Accepts calendar dates, local date-times and RFC 3339 timestamps. A
/// timestamp keeps the calendar date it was written with.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(value) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(value.date());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|value| value.date_naive())
        .ok()
}

/// Format a raw due date with a strftime `pattern`.
///
/// Returns `None` when the date cannot be parsed or the pattern is invalid.
pub fn format_due_date(raw: &str, pattern: &str) -> Option<String> {
    let date = parse_due_date(raw)?;
    let mut out = String::new();
    write!(out, "{}", date.format(pattern)).ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_calendar_date() {
        assert_eq!(
            format_due_date("2025-01-05", DEFAULT_DATE_FORMAT).as_deref(),
            Some("Jan 05, 2025")
        );
    }

    #[test]
    fn keeps_written_date_of_timestamps() {
        assert_eq!(
            format_due_date("2025-12-31T23:30:00-05:00", DEFAULT_DATE_FORMAT).as_deref(),
            Some("Dec 31, 2025")
        );
        assert_eq!(
            format_due_date("2024-02-29T08:15", DEFAULT_DATE_FORMAT).as_deref(),
            Some("Feb 29, 2024")
        );
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        assert!(parse_due_date("tomorrow").is_none());
        assert!(parse_due_date("2025-02-30").is_none());
        assert!(parse_due_date("   ").is_none());
    }

    #[test]
    fn invalid_pattern_does_not_panic() {
        assert!(format_due_date("2025-01-05", "%Q").is_none());
    }
}
