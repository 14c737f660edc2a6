//! Signal history over recent days.
//!
//! Loads the entries of the last week, month or year and tallies how many
//! logged hours went to each entry type.

use crate::clock::{Clock, SystemClock};
use crate::model::day_key::DayKey;
use crate::model::entry::{Entry, EntryType};
use crate::repo::entry_repo::EntryRepository;
use crate::repo::{RepoError, RepoResult};
use chrono::{Local, TimeZone};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

/// Look-back window ending today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryRange {
    /// Last 7 days plus today.
    Week,
    /// Last 30 days plus today.
    Month,
    /// Same day one year ago through today.
    Year,
}

impl HistoryRange {
    /// Inclusive `(start, end)` day keys ending at `today`.
    pub fn bounds(self, today: &DayKey) -> (DayKey, DayKey) {
        let start = match self {
            Self::Week => today.shift_days(-7),
            Self::Month => today.shift_days(-30),
            Self::Year => today.shift_months(-12),
        };
        (start, today.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRangeError(pub String);

impl Display for HistoryRangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported history range `{}`; expected week|month|year",
            self.0
        )
    }
}

impl Error for HistoryRangeError {}

impl FromStr for HistoryRange {
    type Err = HistoryRangeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(HistoryRangeError(value.to_string())),
        }
    }
}

/// Logged hours per entry type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeTally {
    pub signal: u32,
    pub noise: u32,
    pub sleep: u32,
}

impl TypeTally {
    pub fn from_entries(entries: &[Entry]) -> Self {
        entries.iter().fold(Self::default(), |mut tally, entry| {
            match entry.kind {
                EntryType::Signal => tally.signal += 1,
                EntryType::Noise => tally.noise += 1,
                EntryType::Sleep => tally.sleep += 1,
            }
            tally
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalHistory {
    pub range: HistoryRange,
    pub start: DayKey,
    pub end: DayKey,
    pub hours: TypeTally,
    pub entries: Vec<Entry>,
}

pub struct HistoryService<R: EntryRepository> {
    repo: R,
    clock: Arc<dyn Clock>,
}

impl<R: EntryRepository> HistoryService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, Arc::new(SystemClock))
    }

    pub fn with_clock(repo: R, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// History ending on the clock's local day.
    pub fn load(&self, range: HistoryRange) -> RepoResult<SignalHistory> {
        let now_ms = self.clock.now_ms();
        let now = Local.timestamp_millis_opt(now_ms).single().ok_or_else(|| {
            RepoError::InvalidInput(format!("clock time {now_ms} is not a valid local time"))
        })?;
        self.load_until(range, &DayKey::from_date(now.date_naive()))
    }

    pub fn load_until(&self, range: HistoryRange, today: &DayKey) -> RepoResult<SignalHistory> {
        let (start, end) = range.bounds(today);
        let entries = self.repo.list_range(&start, &end)?;
        Ok(SignalHistory {
            range,
            start,
            end,
            hours: TypeTally::from_entries(&entries),
            entries,
        })
    }
}
