//! Calendar-date source and ISO date helpers.
//!
//! All engines work on `NaiveDate` values in the user's local timezone. The
//! wall clock is only read through [`Clock`], so callers can pin "today".

use chrono::{Datelike, Local, NaiveDate, Weekday};

use crate::error::ValidationError;

/// Source of the current calendar day.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock frozen on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = s.trim();
    if trimmed.len() != 10 {
        return Err(ValidationError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Most recent `week_start` on or before `date`.
pub fn week_start_on_or_before(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (date.weekday().num_days_from_monday() + 7
        - week_start.num_days_from_monday())
        % 7;
    date - chrono::Duration::days(i64::from(offset))
}

/// Parse an English weekday name ("monday", "Sun", ...).
pub fn parse_weekday(s: &str) -> Result<Weekday, ValidationError> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| ValidationError::UnknownWeekday(s.to_string()))
}
