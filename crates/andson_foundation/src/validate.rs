//! Month, date, and ranking validators.
//!
//! Shape checks only: a date string is accepted when month is 01–12 and day
//! is 01–31, without month-length or leap-year checks.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})$").expect("valid month regex"));
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("valid date regex"));

/// Lowest accepted ranking.
pub const MIN_RANKING: i64 = 0;
/// Highest accepted ranking.
pub const MAX_RANKING: i64 = 10;

/// Returns true for `YYYY-MM` strings with a month between 01 and 12.
#[must_use]
pub fn is_month_string(value: &str) -> bool {
    MONTH_RE
        .captures(value)
        .is_some_and(|caps| in_range(&caps[2], 1, 12))
}

/// Returns true for `YYYY-MM-DD` strings with month 01–12 and day 01–31.
#[must_use]
pub fn is_date_string(value: &str) -> bool {
    DATE_RE
        .captures(value)
        .is_some_and(|caps| in_range(&caps[2], 1, 12) && in_range(&caps[3], 1, 31))
}

/// Returns true if `ranking` lies in `[0, 10]`.
#[must_use]
pub fn is_available_ranking(ranking: i64) -> bool {
    (MIN_RANKING..=MAX_RANKING).contains(&ranking)
}

/// Validates a month string for `field`.
///
/// # Errors
///
/// Returns `InvalidFormat` if the value is not a month string.
pub fn check_month(field: &'static str, value: &str) -> Result<()> {
    if is_month_string(value) {
        Ok(())
    } else {
        Err(Error::invalid_format(field, value))
    }
}

/// Validates a date string for `field`.
///
/// # Errors
///
/// Returns `InvalidFormat` if the value is not a date string.
pub fn check_date(field: &'static str, value: &str) -> Result<()> {
    if is_date_string(value) {
        Ok(())
    } else {
        Err(Error::invalid_format(field, value))
    }
}

/// Validates a ranking for `field`.
///
/// # Errors
///
/// Returns `OutOfRange` if the value lies outside `[0, 10]`.
pub fn check_ranking(field: &'static str, value: i64) -> Result<()> {
    if is_available_ranking(value) {
        Ok(())
    } else {
        Err(Error::out_of_range(field, value))
    }
}

fn in_range(digits: &str, low: u32, high: u32) -> bool {
    digits
        .parse::<u32>()
        .is_ok_and(|n| (low..=high).contains(&n))
}
