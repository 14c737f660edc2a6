//! Hourly entry use-case service.
//!
//! # Responsibility
//! - Read a day's entries, a range of days, or the full 24-block day view.
//! - Upsert one or several blocks of a day.
//!
//! # Invariants
//! - Writes go through the `(day, block_id)` upsert; a block is never
//!   duplicated.

use crate::model::day_key::DayKey;
use crate::model::entry::{Entry, EntryId, EntryType, EntryUpsert};
use crate::model::time_block::{
    day_blocks, fill_day, BlockSlot, TimeBlock, DEFAULT_DAY_START_HOUR,
};
use crate::repo::entry_repo::EntryRepository;
use crate::repo::RepoResult;
use log::debug;

/// One edited block of a day view, ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEdit {
    pub block_id: String,
    pub task: String,
    pub kind: EntryType,
}

/// Use-case service for hourly entries.
pub struct EntryService<R: EntryRepository> {
    repo: R,
    day_start_hour: u8,
}

impl<R: EntryRepository> EntryService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_day_start_hour(repo, DEFAULT_DAY_START_HOUR)
    }

    /// Uses `day_start_hour` as the first block of the day view.
    pub fn with_day_start_hour(repo: R, day_start_hour: u8) -> Self {
        Self {
            repo,
            day_start_hour: day_start_hour % 24,
        }
    }

    /// The 24 blocks of a day in display order.
    pub fn blocks(&self) -> Vec<TimeBlock> {
        day_blocks(self.day_start_hour)
    }

    /// Stored entries of `day`, ascending by start hour.
    pub fn get_day(&self, day: &DayKey) -> RepoResult<Vec<Entry>> {
        self.repo.list_day(day)
    }

    /// Stored entries with day in `[start, end]`.
    pub fn get_range(&self, start: &DayKey, end: &DayKey) -> RepoResult<Vec<Entry>> {
        self.repo.list_range(start, end)
    }

    /// Upserts the entry at `(day, block_id)` and returns its id.
    ///
    /// # Errors
    /// - `RepoError::InvalidInput` when `start_hour` is above 23.
    pub fn set_entry(
        &self,
        day: &DayKey,
        block_id: &str,
        start_hour: u8,
        task: &str,
        kind: EntryType,
    ) -> RepoResult<EntryId> {
        let id = self.repo.upsert_entry(&EntryUpsert {
            day: day.clone(),
            block_id: block_id.to_string(),
            start_hour,
            task: task.to_string(),
            kind,
        })?;
        debug!(
            "event=entry_upsert module=entries status=ok day={} block_id={} type={}",
            day, block_id, kind
        );
        Ok(id)
    }

    /// All blocks of `day`, with placeholders where nothing is stored.
    pub fn day_view(&self, day: &DayKey) -> RepoResult<Vec<BlockSlot>> {
        let entries = self.repo.list_day(day)?;
        Ok(fill_day(&self.blocks(), &entries))
    }

    /// Saves edited blocks of one day.
    ///
    /// Edits naming a block outside the day layout are skipped. Returns the
    /// ids of the saved entries in edit order.
    pub fn save_blocks(&self, day: &DayKey, edits: &[BlockEdit]) -> RepoResult<Vec<EntryId>> {
        let blocks = self.blocks();
        let mut saved = Vec::with_capacity(edits.len());
        for edit in edits {
            let Some(block) = blocks.iter().find(|block| block.id == edit.block_id) else {
                debug!(
                    "event=entry_save_blocks module=entries status=skipped block_id={}",
                    edit.block_id
                );
                continue;
            };
            saved.push(self.set_entry(day, &block.id, block.start, &edit.task, edit.kind)?);
        }
        Ok(saved)
    }
}
