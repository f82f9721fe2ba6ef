//! Calendar value helpers.
//!
//! Deadlines are calendar dates (`NaiveDate`), never instants. Deadline times
//! are kept at minute precision: the record store sometimes sends `HH:MM:SS`,
//! and trailing seconds must not register as a change.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Implicit deadline time when none is set, or when the midnight placeholder is stored.
pub const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 0) {
    Some(time) => time,
    None => panic!("23:59 is a valid time of day"),
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Drop seconds and sub-seconds from a time of day.
#[must_use]
pub fn normalize_time(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

/// Instant after which a completion counts as late.
///
/// A missing time and the `00:00` placeholder both mean end of day.
#[must_use]
pub fn deadline_instant(date: NaiveDate, time: Option<NaiveTime>) -> NaiveDateTime {
    date.and_time(effective_deadline_time(time))
}

/// Deadline time used for comparisons and sorting.
#[must_use]
pub fn effective_deadline_time(time: Option<NaiveTime>) -> NaiveTime {
    time.map(normalize_time)
        .filter(|t| *t != NaiveTime::MIN)
        .unwrap_or(END_OF_DAY)
}

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    normalize_time(time).format(TIME_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns the chrono parse error for malformed input.
pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
}

/// Parse an `HH:MM` or `HH:MM:SS` time of day, normalised to minutes.
///
/// # Errors
///
/// Returns the chrono parse error when neither form matches.
pub fn parse_time(s: &str) -> Result<NaiveTime, chrono::ParseError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, TIME_FORMAT))
        .map(normalize_time)
}

// ---------------------------------------------------------------------------
// Period
// ---------------------------------------------------------------------------

/// Year/month bucket a client-process instance belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Period a calendar date falls in.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }
}

impl FromStr for Period {
    type Err = CoreError;

    /// Parse `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::Validation(format!("invalid period '{s}', expected YYYY-MM"));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self::new(year, month))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Serde adapter for optional times written as `HH:MM`.
///
/// Accepts `HH:MM:SS` on input and drops the seconds.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        value: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => serializer.serialize_some(&super::format_time(*time)),
            None => serializer.serialize_none(),
        }
    }

    /// # Errors
    ///
    /// Fails on strings that are neither `HH:MM` nor `HH:MM:SS`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) if !s.trim().is_empty() => super::parse_time(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}
