//! Calendar day keys (`YYYY-MM-DD`).
//!
//! # Invariants
//! - Keys are always zero-padded, so plain string comparison is
//!   chronological comparison. Range queries in storage rely on this.
//! - A key always names a real calendar date.

use chrono::{Days, Local, Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

static DAY_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid day key regex"));

/// Validation failure for day key input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayKeyError {
    /// Input is not in zero-padded `YYYY-MM-DD` form.
    Malformed(String),
    /// Input has the right shape but is not a calendar date.
    InvalidDate(String),
}

impl Display for DayKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => {
                write!(f, "day key `{value}` must be zero-padded YYYY-MM-DD")
            }
            Self::InvalidDate(value) => write!(f, "day key `{value}` is not a calendar date"),
        }
    }
}

impl Error for DayKeyError {}

/// A calendar day used to scope entries, tasks and legacy projects.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey {
    key: String,
    date: NaiveDate,
}

impl DayKey {
    /// Parses a zero-padded `YYYY-MM-DD` key. Surrounding whitespace is ignored.
    pub fn parse(value: &str) -> Result<Self, DayKeyError> {
        let trimmed = value.trim();
        if !DAY_KEY_RE.is_match(trimmed) {
            return Err(DayKeyError::Malformed(value.to_string()));
        }
        let date = NaiveDate::parse_from_str(trimmed, DAY_KEY_FORMAT)
            .map_err(|_| DayKeyError::InvalidDate(trimmed.to_string()))?;
        Ok(Self {
            key: trimmed.to_string(),
            date,
        })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            key: date.format(DAY_KEY_FORMAT).to_string(),
            date,
        }
    }

    /// Today in the local time zone.
    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Moves by whole days; out-of-range results keep the current day.
    pub fn shift_days(&self, delta: i64) -> Self {
        let shifted = if delta >= 0 {
            self.date.checked_add_days(Days::new(delta.unsigned_abs()))
        } else {
            self.date.checked_sub_days(Days::new(delta.unsigned_abs()))
        };
        Self::from_date(shifted.unwrap_or(self.date))
    }

    /// Moves by whole months, clamping to the last day of shorter months.
    pub fn shift_months(&self, delta: i32) -> Self {
        let shifted = if delta >= 0 {
            self.date.checked_add_months(Months::new(delta.unsigned_abs()))
        } else {
            self.date.checked_sub_months(Months::new(delta.unsigned_abs()))
        };
        Self::from_date(shifted.unwrap_or(self.date))
    }

    /// Header label, e.g. `SATURDAY, NOV 9`.
    pub fn long_label(&self) -> String {
        self.date.format("%A, %b %-d").to_string().to_uppercase()
    }

    /// Compact label, e.g. `SAT 09 NOV`.
    pub fn compact_label(&self) -> String {
        self.date.format("%a %d %b").to_string().to_uppercase()
    }
}

impl Display for DayKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key)
    }
}

impl FromStr for DayKey {
    type Err = DayKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for DayKey {
    type Error = DayKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DayKey> for String {
    fn from(value: DayKey) -> Self {
        value.key
    }
}
