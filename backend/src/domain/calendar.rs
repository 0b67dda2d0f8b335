//! Lenient calendar date parsing shared by exercise creation and log filters.
//!
//! Accepted forms, after trimming surrounding whitespace:
//! - RFC 3339 timestamps (`2024-01-05T10:30:00Z`, `2024-01-05T10:30:00+02:00`)
//!   and compact offsets (`2024-01-05T10:30:00.000+0000`)
//! - RFC 2822 timestamps (`Fri, 5 Jan 2024 10:30:00 GMT`)
//! - local date-times without an offset, read as UTC (`2024-01-05T10:30`,
//!   `2024-01-05T10:30:00`, `2024-01-05 10:30:00`, `2024-01-05T10:30:00.250`)
//! - dates, read as UTC midnight (`2024-01-05`, `2024/01/05`, `01/05/2024`,
//!   `Jan 5, 2024`, `5 January 2024`)
//! - partial ISO dates, read as the first day of the period (`2024-01`,
//!   `2024`)

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, Utc};

const OFFSET_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M%z",
];

const NAIVE_DATE_TIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Parse a user-supplied date string, returning `None` when it is not a valid
/// calendar date.
///
/// # Examples
/// ```
/// use exercise_tracker::domain::parse_calendar_date;
///
/// assert!(parse_calendar_date("2024-01-05").is_some());
/// assert!(parse_calendar_date("Jan 5, 2024").is_some());
/// assert!(parse_calendar_date("2024-02-30").is_none());
/// assert!(parse_calendar_date("yesterday").is_none());
/// ```
pub fn parse_calendar_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(to_stored_precision(parsed.with_timezone(&Utc)));
    }

    let with_offset = OFFSET_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| DateTime::parse_from_rfc2822(trimmed).ok());
    if let Some(parsed) = with_offset {
        return Some(to_stored_precision(parsed.with_timezone(&Utc)));
    }

    if let Some(parsed) = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Some(to_stored_precision(parsed.and_utc()));
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| parse_partial_date(trimmed))
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// `YYYY` or `YYYY-MM`, anchored to the first day of the period.
fn parse_partial_date(trimmed: &str) -> Option<NaiveDate> {
    let mut parts = trimmed.split('-');
    let year = parts.next().filter(|year| is_digits(year, 4))?;
    let month = match parts.next() {
        None => "01",
        Some(month) if is_digits(month, 2) => month,
        Some(_) => return None,
    };
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::parse_from_str(&format!("{year}-{month}-01"), "%Y-%m-%d").ok()
}

fn is_digits(part: &str, len: usize) -> bool {
    part.len() == len && part.bytes().all(|byte| byte.is_ascii_digit())
}

/// Truncate a timestamp to the millisecond precision used for stored dates.
pub fn to_stored_precision(value: DateTime<Utc>) -> DateTime<Utc> {
    value.trunc_subsecs(3)
}

/// Render a stored date as an ISO-8601 UTC string with milliseconds.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use exercise_tracker::domain::format_calendar_date;
///
/// let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// assert_eq!(format_calendar_date(&date), "2024-01-01T00:00:00.000Z");
/// ```
pub fn format_calendar_date(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
