//! Hourly time-block entries.
//!
//! # Invariants
//! - At most one entry exists per `(day, block_id)`.
//! - `start_hour` is within `0..=23`.

use crate::model::day_key::DayKey;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

pub type EntryId = Uuid;

/// How an hour was spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    Signal,
    Noise,
    Sleep,
}

impl EntryType {
    pub const ALL: [EntryType; 3] = [EntryType::Signal, EntryType::Noise, EntryType::Sleep];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Signal => "Signal",
            Self::Noise => "Noise",
            Self::Sleep => "Sleep",
        }
    }
}

impl Display for EntryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Input is not one of `Signal`, `Noise`, `Sleep`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTypeError(pub String);

impl Display for EntryTypeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported entry type `{}`; expected Signal|Noise|Sleep",
            self.0
        )
    }
}

impl Error for EntryTypeError {}

impl FromStr for EntryType {
    type Err = EntryTypeError;

    /// Case-insensitive match on the three entry types.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| EntryTypeError(value.to_string()))
    }
}

/// One stored hour of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub day: DayKey,
    pub block_id: String,
    pub start_hour: u8,
    pub task: String,
    #[serde(rename = "type")]
    pub kind: EntryType,
}

/// Write request for the `(day, block_id)` upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryUpsert {
    pub day: DayKey,
    pub block_id: String,
    pub start_hour: u8,
    pub task: String,
    pub kind: EntryType,
}

#[cfg(test)]
mod tests {
    use super::EntryType;

    #[test]
    fn entry_type_parses_case_insensitively() {
        assert_eq!("signal".parse::<EntryType>().unwrap(), EntryType::Signal);
        assert_eq!(" NOISE ".parse::<EntryType>().unwrap(), EntryType::Noise);
        assert!("Work".parse::<EntryType>().is_err());
    }

    #[test]
    fn entry_type_serializes_with_capitalized_names() {
        assert_eq!(
            serde_json::to_string(&EntryType::Sleep).unwrap(),
            "\"Sleep\""
        );
    }
}
