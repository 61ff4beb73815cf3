use chrono::{DateTime, NaiveDate, Weekday};

/// Display order for weekday groupings, Monday first.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Parses a calendar date from the formats commonly found in booking exports.
///
/// Unrecognised values yield `None` instead of an error: a row with an unreadable
/// date is kept in the dataset but can never match a date filter.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }

    // Full timestamps: keep only the calendar date.
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    if let Some((date_part, _)) = raw.split_once([' ', 'T']) {
        return NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok();
    }

    None
}

/// Returns the Monday-based position of a weekday label ("Monday", "mon", "TUE", ...).
pub fn weekday_index(label: &str) -> Option<usize> {
    label
        .trim()
        .parse::<Weekday>()
        .ok()
        .map(|day| day.num_days_from_monday() as usize)
}
