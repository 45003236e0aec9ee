use crate::errors::StoreError;
use chrono::{Local, NaiveDate, TimeZone};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Today's local calendar date as `YYYY-MM-DD`.
pub fn today() -> String {
    date_key(today_date())
}

pub fn today_date() -> NaiveDate {
    Local::now().date_naive()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parses a strict `YYYY-MM-DD` key.
pub fn parse_date_key(value: &str) -> Result<NaiveDate, StoreError> {
    // chrono accepts unpadded fields; keys must stay comparable as strings.
    if value.len() != 10 {
        return Err(StoreError::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, DATE_KEY_FORMAT)
        .map_err(|_| StoreError::InvalidDate(value.to_string()))
}

/// `"2024-03-05"` becomes `"Tue, Mar 5, 2024"`.
///
/// The key is interpreted as a plain calendar date, so the result never
/// depends on the local timezone. Input that is not a valid key is returned
/// unchanged.
pub fn format_for_display(date: &str) -> String {
    match parse_date_key(date) {
        Ok(parsed) => parsed.format("%a, %b %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// `"Tuesday, March 5, 2024"`, used for the page header.
pub fn format_long(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn format_month_title(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.format("%B %Y").to_string())
        .unwrap_or_default()
}

/// Local wall-clock time of a write, e.g. `"9:05 PM"`.
pub fn format_logged_time(timestamp_ms: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|at| at.format("%-I:%M %p").to_string())
        .unwrap_or_default()
}
