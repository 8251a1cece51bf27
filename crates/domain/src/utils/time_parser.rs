//! Preferred-time parser.
//!
//! Turns expressions like `"10/05/2025 às 10h"` or `"12/05 15h"` into an
//! instant in the business timezone. Only the `D/M[/YYYY] Hh` shape is
//! understood; weekday names and relative dates are rejected rather than
//! guessed.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::TIME_FILLER_PHRASES;
use crate::errors::ParseError;

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{4}))?\s+(\d{1,2})h")
        .expect("TIME_PATTERN should compile - this is a bug")
});

/// Parse a preferred-time expression.
///
/// `reference` supplies the year when the text omits it; the year is taken
/// in `timezone`, not in UTC.
///
/// # Errors
/// Returns [`ParseError`] carrying the original text when the pattern does
/// not match or the date/time does not exist (day 32, month 13, hour 25, a
/// local time skipped by a DST change).
pub fn parse_preferred_time(
    text: &str,
    timezone: Tz,
    reference: DateTime<Utc>,
) -> Result<DateTime<Tz>, ParseError> {
    let normalized = normalize(text);
    let captures = TIME_PATTERN.captures(&normalized).ok_or_else(|| ParseError::new(text))?;

    let number = |index: usize| -> Result<u32, ParseError> {
        captures
            .get(index)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .ok_or_else(|| ParseError::new(text))
    };

    let day = number(1)?;
    let month = number(2)?;
    let hour = number(4)?;
    let year = match captures.get(3) {
        Some(m) => m.as_str().parse::<i32>().map_err(|_| ParseError::new(text))?,
        None => reference.with_timezone(&timezone).year(),
    };

    let local = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .ok_or_else(|| ParseError::new(text))?;

    timezone.from_local_datetime(&local).single().ok_or_else(|| ParseError::new(text))
}

fn normalize(text: &str) -> String {
    let mut normalized = text.to_lowercase();
    for filler in TIME_FILLER_PHRASES {
        normalized = normalized.replace(filler, "");
    }
    normalized.trim().to_string()
}
