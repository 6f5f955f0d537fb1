//! Brazilian date formatting for report fields.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static CLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{1,2}:\d{2}").expect("static regex"));

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M%:z"];

const DATE_FORMAT: &str = "%d/%m/%Y";
const DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// A date value in any of the shapes a report field can carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateInput<'a> {
    /// Free-form string, usually ISO-8601 from Notion.
    Text(&'a str),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Timestamp(DateTime<FixedOffset>),
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(value: &'a str) -> Self {
        DateInput::Text(value)
    }
}

impl From<NaiveDate> for DateInput<'_> {
    fn from(value: NaiveDate) -> Self {
        DateInput::Date(value)
    }
}

impl From<NaiveDateTime> for DateInput<'_> {
    fn from(value: NaiveDateTime) -> Self {
        DateInput::DateTime(value)
    }
}

impl From<DateTime<FixedOffset>> for DateInput<'_> {
    fn from(value: DateTime<FixedOffset>) -> Self {
        DateInput::Timestamp(value)
    }
}

/// Formats a date as `dd/mm/YYYY`, appending ` HH:MM:SS` when the input
/// carries a time.
///
/// Timestamp values always carry a time. A string carries one when it
/// contains an `HH:MM` clock. Timestamps with an offset are shown in their
/// own local time, not converted. A string that does not parse is returned
/// trimmed; a blank string yields `""`.
///
/// ```rust
/// use report::format_br_date;
///
/// assert_eq!(format_br_date("2024-05-01T14:30:00.000-03:00".into()), "01/05/2024 14:30:00");
/// assert_eq!(format_br_date("2024-05-01".into()), "01/05/2024");
/// assert_eq!(format_br_date("amanhã".into()), "amanhã");
/// ```
pub fn format_br_date(input: DateInput<'_>) -> String {
    match input {
        DateInput::Text(raw) => format_text(raw),
        DateInput::Date(date) => date.format(DATE_FORMAT).to_string(),
        DateInput::DateTime(dt) => dt.format(DATETIME_FORMAT).to_string(),
        DateInput::Timestamp(ts) => ts.naive_local().format(DATETIME_FORMAT).to_string(),
    }
}

fn format_text(raw: &str) -> String {
    let text = raw.trim();
    if text.is_empty() {
        return String::new();
    }
    let has_time = CLOCK.is_match(text);

    let parsed = parse_datetime(text)
        .map(|dt| (dt.date(), Some(dt)))
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(|d| (d, None))
        });

    match parsed {
        Some((_, Some(dt))) if has_time => dt.format(DATETIME_FORMAT).to_string(),
        Some((date, _)) => date.format(DATE_FORMAT).to_string(),
        None => {
            debug!(value = %text, "unparseable date kept as-is");
            text.to_string()
        }
    }
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.naive_local());
    }
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(text, fmt) {
            return Some(ts.naive_local());
        }
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}
