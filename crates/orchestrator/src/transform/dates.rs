#![forbid(unsafe_code)]

use chrono::format::{ParseError, ParseErrorKind};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateFailure {
    Missing,
    InvalidFormat,
    OutOfRange,
}

impl DateFailure {
    fn placeholder(self) -> &'static str {
        match self {
            Self::Missing => "Date unavailable",
            Self::InvalidFormat => "Invalid date format",
            Self::OutOfRange => "Date format error",
        }
    }
}

/// Card label, e.g. `01/31/2024 at 3:05 PM UTC`.
///
/// Unusable input renders a placeholder telling apart a missing value, text
/// that is not a timestamp, and a timestamp whose fields are out of range.
pub fn format_update_time(value: &str) -> String {
    match parse(value) {
        Ok(timestamp) => timestamp.format("%m/%d/%Y at %-I:%M %p UTC").to_string(),
        Err(failure) => failure.placeholder().to_owned(),
    }
}

/// Detail label, e.g. `January 31, 2024, 03:05 PM`. Falls back to the raw text.
pub fn format_detail_time(value: &str) -> String {
    match parse(value) {
        Ok(timestamp) => timestamp.format("%B %-d, %Y, %I:%M %p").to_string(),
        Err(_) => value.to_owned(),
    }
}

fn parse(value: &str) -> Result<DateTime<Utc>, DateFailure> {
    let value = value.trim();
    if value.is_empty() || value == "undefined" || value == "null" {
        return Err(DateFailure::Missing);
    }

    let mut errors: Vec<ParseError> = Vec::new();

    match DateTime::parse_from_rfc3339(value) {
        Ok(timestamp) => return Ok(timestamp.with_timezone(&Utc)),
        Err(err) => errors.push(err),
    }
    for layout in NAIVE_LAYOUTS {
        match NaiveDateTime::parse_from_str(value, layout) {
            Ok(naive) => return Ok(naive.and_utc()),
            Err(err) => errors.push(err),
        }
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(midnight.and_utc());
            }
        }
        Err(err) => errors.push(err),
    }

    let out_of_range = errors.iter().any(|err| {
        matches!(
            err.kind(),
            ParseErrorKind::OutOfRange | ParseErrorKind::Impossible
        )
    });
    if out_of_range {
        Err(DateFailure::OutOfRange)
    } else {
        Err(DateFailure::InvalidFormat)
    }
}
