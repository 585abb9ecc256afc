//! Parsing of the optional expiration date submitted with a new link.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use crate::error::AppError;

/// Date format produced by `<input type="date">`.
pub const EXPIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an expiration date (`YYYY-MM-DD`) as midnight UTC of that day.
///
/// Empty or whitespace-only input means "no expiration".
///
/// # Errors
///
/// Returns [`AppError::Validation`] with "Invalid expiration date." when the
/// input cannot be parsed.
pub fn parse_expire_date(input: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    let Some(raw) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let date = NaiveDate::parse_from_str(raw, EXPIRE_DATE_FORMAT).map_err(|e| {
        AppError::bad_request(
            "Invalid expiration date.",
            json!({ "expire": raw, "reason": e.to_string() }),
        )
    })?;

    Ok(Some(date.and_time(chrono::NaiveTime::MIN).and_utc()))
}
