//! Calendar dates stored as `YYYY-MM-DD` text.
//!
//! The store keeps dates as plain strings. Parseability is checked here, at
//! the input boundary, and accepted values are normalised to zero-padded form
//! before they are persisted.

use chrono::NaiveDate;

use crate::{Result, ValidationError};

/// `strftime` pattern for every persisted date column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse `value` as a calendar date, attributing failures to `field`.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(ValidationError::Blank { field });
  }
  let invalid = || ValidationError::InvalidDate {
    field,
    value: value.to_owned(),
  };
  // `%Y` alone also takes short or signed years.
  let year = trimmed.split('-').next().unwrap_or_default();
  if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
    return Err(invalid());
  }
  NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| invalid())
}

pub fn format_date(date: NaiveDate) -> String { date.format(DATE_FORMAT).to_string() }

/// Parse and re-format, so `2024-3-5` is stored as `2024-03-05`.
pub fn normalize_date(field: &'static str, value: &str) -> Result<String> {
  parse_date(field, value).map(format_date)
}
