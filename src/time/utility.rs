use chrono::{
    Datelike,
    Days,
    NaiveDate,
    Weekday
};
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("date must be in YYYY-MM-DD format, got: {0}")]
pub struct DateParseError(pub String);

/// Canonical `YYYY-MM-DD` representation, zero padded.
pub fn format_date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

/// Strict `YYYY-MM-DD` parsing: exactly three dash separated fields with a
/// four digit year and two digit month and day.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateParseError> {
    let parts: Vec<&str> = s.split('-').collect();
    let well_formed = parts.len() == 3
        && parts[0].len() == 4
        && parts[1].len() == 2
        && parts[2].len() == 2
        && parts.iter().all(|p| p.bytes().all(|b| b.is_ascii_digit()));
    if !well_formed {
        return Err(DateParseError(s.to_owned()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| DateParseError(s.to_owned()))
}

#[inline]
pub fn is_weekend(d: NaiveDate) -> bool {
    matches!(d.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Calendar increment by `days` (negative steps backwards). `None` once the
/// result leaves chrono's representable range.
pub fn add_days(d: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        d.checked_add_days(Days::new(days as u64))
    } else {
        d.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

#[inline]
pub fn is_same_day(d1: NaiveDate, d2: NaiveDate) -> bool {
    d1 == d2
}

/// Number of days in `[from, to]`, both ends included.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days() + 1
}
