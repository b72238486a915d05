//! Value rules shared by the GraphQL scalars in both directions.
//!
//! Every scalar funnels its input (variables and inline literals) and its
//! output through exactly one function here, so the two paths cannot drift.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use regex::Regex;
use thiserror::Error;

pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is not a valid date")]
    InvalidDate(String),
    #[error("{0} is not a valid email")]
    InvalidEmail(String),
    #[error("password is not strong enough: use 6-16 letters, digits or !@#$%^&*, with at least one digit and one symbol")]
    WeakPassword,
    #[error("{0} is not a valid gender, expected one of: male, female")]
    InvalidEnumValue(String),
    #[error("{0} is not a valid id")]
    InvalidId(String),
}

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();
static PASSWORD_CHARSET: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,3})+$",
        )
        .expect("email pattern compiles")
    })
}

fn password_charset() -> &'static Regex {
    PASSWORD_CHARSET
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9!@#$%^&*]{6,16}$").expect("password pattern compiles"))
}

/// Parses any of the accepted date shapes into a UTC instant.
///
/// Accepted: RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC),
/// `YYYY-MM-DD` (UTC midnight), RFC 2822 and integer epoch milliseconds.
/// Instants outside years 0000..=9999 are rejected so the canonical form
/// always has a four-digit year and parses back to itself.
pub fn validate_date(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    parse_date(raw.trim())
        .filter(|date| (MIN_YEAR..=MAX_YEAR).contains(&date.year()))
        .ok_or_else(|| ValidationError::InvalidDate(raw.to_string()))
}

const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|midnight| Utc.from_utc_datetime(&midnight));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    value.parse::<i64>().ok().and_then(date_from_millis)
}

pub fn date_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

/// Renders the canonical form, e.g. `2024-03-01T09:30:00.000Z`.
pub fn canonical_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn normalize_date(raw: &str) -> Result<String, ValidationError> {
    validate_date(raw).map(|date| canonical_date(&date))
}

pub fn validate_email(raw: &str) -> Result<&str, ValidationError> {
    if email_pattern().is_match(raw) {
        Ok(raw)
    } else {
        Err(ValidationError::InvalidEmail(raw.to_string()))
    }
}

pub fn validate_password(raw: &str) -> Result<&str, ValidationError> {
    let has_digit = raw.chars().any(|c| c.is_ascii_digit());
    let has_symbol = raw.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

    if has_digit && has_symbol && password_charset().is_match(raw) {
        Ok(raw)
    } else {
        Err(ValidationError::WeakPassword)
    }
}
