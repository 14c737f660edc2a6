//! Fixed hourly blocks that make up a day view.
//!
//! A day is 24 one-hour blocks starting at a configurable hour and wrapping
//! past midnight, e.g. with a start hour of 10 the last block is 9-10 AM.

use crate::model::entry::{Entry, EntryId, EntryType};
use serde::Serialize;
use std::collections::HashMap;

pub const BLOCK_COUNT: u8 = 24;
pub const DEFAULT_DAY_START_HOUR: u8 = 10;

/// One hour-of-day window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeBlock {
    /// `block-{start}`; the stored entry key.
    pub id: String,
    pub label: String,
    pub start: u8,
    pub end: u8,
}

impl TimeBlock {
    pub fn starting_at(hour: u8) -> Self {
        let start = hour % 24;
        let end = (start + 1) % 24;
        Self {
            id: block_id_for_hour(start),
            label: format!("{} - {}", format_hour(start), format_hour(end)),
            start,
            end,
        }
    }
}

/// A block paired with its stored entry, or the empty `Sleep` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSlot {
    pub block: TimeBlock,
    pub entry_id: Option<EntryId>,
    pub task: String,
    #[serde(rename = "type")]
    pub kind: EntryType,
}

pub fn block_id_for_hour(hour: u8) -> String {
    format!("block-{}", hour % 24)
}

/// Formats an hour as `h:00 AM|PM`, with 0 and 12 rendered as 12.
pub fn format_hour(hour: u8) -> String {
    let normalized = hour % 24;
    let suffix = if normalized >= 12 { "PM" } else { "AM" };
    let hour12 = match normalized % 12 {
        0 => 12,
        other => other,
    };
    format!("{hour12}:00 {suffix}")
}

/// Returns the 24 blocks of a day in display order.
pub fn day_blocks(start_hour: u8) -> Vec<TimeBlock> {
    (0..BLOCK_COUNT)
        .map(|index| TimeBlock::starting_at((start_hour % 24 + index) % 24))
        .collect()
}

/// Lays stored entries over the day's blocks.
///
/// Entries whose block id is not part of `blocks` are ignored.
pub fn fill_day(blocks: &[TimeBlock], entries: &[Entry]) -> Vec<BlockSlot> {
    let by_block: HashMap<&str, &Entry> = entries
        .iter()
        .map(|entry| (entry.block_id.as_str(), entry))
        .collect();

    blocks
        .iter()
        .map(|block| match by_block.get(block.id.as_str()) {
            Some(entry) => BlockSlot {
                block: block.clone(),
                entry_id: Some(entry.id),
                task: entry.task.clone(),
                kind: entry.kind,
            },
            None => BlockSlot {
                block: block.clone(),
                entry_id: None,
                task: String::new(),
                kind: EntryType::Sleep,
            },
        })
        .collect()
}
