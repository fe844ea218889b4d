//! Calendar helpers for the period (`YYYY-MM`) and date (`YYYY-MM-DD`) keys
//! derived from a transaction's year, month and day.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::Month;

use crate::Error;

/// A year, month or day as sent by a client.
///
/// Clients send date components either as JSON numbers or as numeric
/// strings, e.g. `5` or `"05"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateComponent {
    /// A component sent as a JSON number.
    Number(i64),
    /// A component sent as a JSON string.
    Text(String),
}

impl DateComponent {
    /// Whether the component counts as absent.
    ///
    /// Blank text and the number zero are both treated as missing.
    pub fn is_missing(&self) -> bool {
        match self {
            DateComponent::Number(number) => *number == 0,
            DateComponent::Text(text) => text.trim().is_empty(),
        }
    }

    /// The integer value of the component, or `None` if it is not a whole number.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            DateComponent::Number(number) => Some(*number),
            DateComponent::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl Display for DateComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateComponent::Number(number) => write!(f, "{number}"),
            DateComponent::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<i64> for DateComponent {
    fn from(value: i64) -> Self {
        DateComponent::Number(value)
    }
}

impl From<&str> for DateComponent {
    fn from(value: &str) -> Self {
        DateComponent::Text(value.to_owned())
    }
}

/// Build the period key `YYYY-MM` from a year and a month.
///
/// The year is zero-padded to four digits and the month to two.
///
/// # Errors
/// Returns [Error::InvalidDateComponent] if either component is missing or is
/// not a whole number.
pub fn derive_period(
    year: Option<&DateComponent>,
    month: Option<&DateComponent>,
) -> Result<String, Error> {
    let year = integer_component("year", year)?;
    let month = integer_component("month", month)?;

    Ok(format!("{year:04}-{month:02}"))
}

/// Build the date key `YYYY-MM-DD` from a year, month and day.
///
/// # Errors
/// Returns [Error::InvalidDateComponent] if any component is missing or is
/// not a whole number.
pub fn derive_date(
    year: Option<&DateComponent>,
    month: Option<&DateComponent>,
    day: Option<&DateComponent>,
) -> Result<String, Error> {
    let period = derive_period(year, month)?;
    let day = integer_component("day", day)?;

    Ok(format!("{period}-{day:02}"))
}

/// Check that `period` is exactly four digits, a hyphen and two digits.
///
/// # Errors
/// Returns [Error::InvalidPeriodFormat] if `period` does not look like `YYYY-MM`.
pub fn validate_period_format(period: &str) -> Result<(), Error> {
    let bytes = period.as_bytes();
    let is_valid = bytes.len() == 7
        && bytes
            .iter()
            .enumerate()
            .all(|(index, byte)| match index {
                4 => *byte == b'-',
                _ => byte.is_ascii_digit(),
            });

    if is_valid {
        Ok(())
    } else {
        Err(Error::InvalidPeriodFormat(period.to_owned()))
    }
}

/// Check that `day` exists in `month` of `year`.
///
/// A month outside 1-12 has no valid days.
///
/// # Errors
/// Returns [Error::InvalidDay] if `day` is not between 1 and the last day of the month.
pub fn validate_day_for_month(day: i64, month: i64, year: i64) -> Result<(), Error> {
    let last_day = u8::try_from(month)
        .ok()
        .and_then(|month| Month::try_from(month).ok())
        .zip(i32::try_from(year).ok())
        .map(|(month, year)| month.length(year));

    match last_day {
        Some(last_day) if (1..=i64::from(last_day)).contains(&day) => Ok(()),
        _ => Err(Error::InvalidDay { day, month, year }),
    }
}

/// Read a date component as an integer.
///
/// # Errors
/// Returns [Error::InvalidDateComponent] naming `name` if the component is
/// missing or not a whole number.
pub(crate) fn integer_component(
    name: &'static str,
    component: Option<&DateComponent>,
) -> Result<i64, Error> {
    component
        .and_then(DateComponent::as_integer)
        .ok_or(Error::InvalidDateComponent(name))
}
