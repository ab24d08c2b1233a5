//! Date conversions for calendar widgets
//!
//! The date-picker pages render US-format dates and month names; these helpers
//! turn them into values the navigation logic can compare.

use chrono::{Month, NaiveDate};

use crate::{Error, Result};

/// US date format used by the demo sites
pub const US_DATE_FORMAT: &str = "%m/%d/%Y";

/// Parse a `MM/DD/YYYY` date string
pub fn parse_us_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, US_DATE_FORMAT)
        .map_err(|e| Error::internal(format!("Invalid date format: {} ({})", date, e)))
}

/// Format a date back to `MM/DD/YYYY`
pub fn format_us_date(date: NaiveDate) -> String {
    date.format(US_DATE_FORMAT).to_string()
}

/// Month number (1-12) for an English month name
pub fn month_number(month_name: &str) -> Result<u32> {
    let month: Month = month_name
        .parse()
        .map_err(|_| Error::internal(format!("Invalid month name: {}", month_name)))?;
    Ok(month.number_from_month())
}

/// Year and month displayed by a calendar header like `"February 2026"`
pub fn parse_month_year(header: &str) -> Result<(u32, i32)> {
    let mut parts = header.split_whitespace();
    let month_name = parts
        .next()
        .ok_or_else(|| Error::internal(format!("Invalid calendar header: {}", header)))?;
    let year = parts
        .next()
        .and_then(|y| y.parse().ok())
        .ok_or_else(|| Error::internal(format!("Invalid calendar header: {}", header)))?;
    Ok((month_number(month_name)?, year))
}
