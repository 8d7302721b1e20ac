//! Date normalisation at the import boundary.
//!
//! One schema revision of the upstream dataset stored dates as
//! `DD-MM-YYYY` strings. The canonical representation everywhere in this
//! codebase is an ISO 8601 calendar date; all flexible parsing lives here
//! so query-time code never touches raw date strings.

use chrono::NaiveDate;

use crate::{Error, Result};

/// Parse a date in canonical ISO form (`YYYY-MM-DD`) or the legacy
/// `DD-MM-YYYY` form.
///
/// The two formats cannot collide: a four-digit year in front fails the
/// legacy parse and vice versa.
pub fn parse_flexible_date(raw: &str) -> Result<NaiveDate> {
  let trimmed = raw.trim();
  if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
    return Ok(date);
  }
  if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d-%m-%Y") {
    return Ok(date);
  }
  Err(Error::InvalidDate(raw.to_owned()))
}
