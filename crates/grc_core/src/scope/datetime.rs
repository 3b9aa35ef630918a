//! Locale date string parsing for UI and CSV timestamps.
//!
//! # Invariants
//! - Values carrying an offset are converted to UTC.
//! - Values with a time of day but no offset are taken as UTC.
//! - Date-only values resolve to midnight UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Author prefix embedded in comment timestamps: `(Jane Doe) 08/20/2017 ...`.
static TEXT_IN_PARENTHESES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)").expect("valid parentheses regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const OFFSET_FORMATS: &[&str] = &[
    "%m/%d/%Y %I:%M:%S %p %:z",
    "%m/%d/%Y %I:%M:%S %p %z",
    "%m/%d/%Y %I:%M %p %:z",
    "%m/%d/%Y %H:%M:%S %:z",
    "%m-%d-%Y %H:%M:%S %:z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S %:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m-%d-%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%m-%d-%Y", "%Y-%m-%d"];

/// Display format used when an entity is re-serialized into a scope.
const UI_DATETIME_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p %:z";

/// Parses a UI or CSV date string into UTC.
///
/// Returns `None` when no supported layout matches.
pub fn parse_ui_datetime(value: &str) -> Option<DateTime<Utc>> {
    let normalized = WHITESPACE_RE.replace_all(value.trim(), " ");
    let text = normalized.as_ref();
    if text.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(text, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&parsed));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|midnight| Utc.from_utc_datetime(&midnight));
        }
    }
    None
}

/// Parses a comment timestamp after removing its `(Author)` prefix.
pub fn parse_comment_datetime(value: &str) -> Option<DateTime<Utc>> {
    let stripped = TEXT_IN_PARENTHESES_RE.replace_all(value, "");
    parse_ui_datetime(&stripped)
}

/// Formats a UTC timestamp the way the info widget displays it.
pub fn format_ui_datetime(value: &DateTime<Utc>) -> String {
    value.format(UI_DATETIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::{format_ui_datetime, parse_comment_datetime, parse_ui_datetime};
    use chrono::{TimeZone, Utc};

    #[test]
    fn date_only_is_midnight_utc() {
        let parsed = parse_ui_datetime("08/20/2017").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2017, 8, 20, 0, 0, 0).unwrap());
    }

    #[test]
    fn offset_is_converted_to_utc() {
        let parsed = parse_ui_datetime("08/20/2017 07:30:45 AM +03:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2017, 8, 20, 4, 30, 45).unwrap());
    }

    #[test]
    fn csv_naive_time_is_taken_as_utc() {
        let parsed = parse_ui_datetime("08-20-2017 04:30:45").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2017, 8, 20, 4, 30, 45).unwrap());
    }

    #[test]
    fn comment_author_prefix_is_stripped() {
        let parsed = parse_comment_datetime("(Jane Doe) 08/20/2017 07:30:45 AM +03:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2017-08-20T04:30:45+00:00");
    }

    #[test]
    fn formatted_value_parses_back() {
        let value = Utc.with_ymd_and_hms(2020, 1, 2, 15, 4, 5).unwrap();
        assert_eq!(parse_ui_datetime(&format_ui_datetime(&value)), Some(value));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_ui_datetime("yesterday-ish").is_none());
        assert!(parse_ui_datetime("   ").is_none());
    }
}
