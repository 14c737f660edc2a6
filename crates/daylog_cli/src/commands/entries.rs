//! Entries command - hourly log reads and writes

use anyhow::Result;
use clap::Subcommand;
use daylog_core::{DayKey, Entry, EntryType};

use super::{day_or_today, Session};
use crate::output;

#[derive(Subcommand)]
pub enum EntriesCommands {
    /// Stored entries of a day, by start hour
    Day {
        /// Day key (YYYY-MM-DD), defaults to today
        day: Option<DayKey>,
    },

    /// Stored entries between two days, inclusive
    Range {
        /// First day (YYYY-MM-DD)
        start: DayKey,
        /// Last day (YYYY-MM-DD)
        end: DayKey,
    },

    /// Create or replace the entry of one block
    Set {
        /// Day key (YYYY-MM-DD)
        day: DayKey,
        /// Block id, e.g. block-10
        block: String,
        /// Start hour 0-23
        hour: u8,
        /// Entry type (signal, noise, sleep)
        #[arg(value_name = "TYPE")]
        kind: EntryType,
        /// What the hour was spent on
        #[arg(default_value = "")]
        task: String,
    },

    /// All 24 blocks of a day, empty ones included
    View {
        /// Day key (YYYY-MM-DD), defaults to today
        day: Option<DayKey>,
    },
}

pub fn run(session: &Session, command: EntriesCommands) -> Result<()> {
    let service = session.ctx.entries()?;
    match command {
        EntriesCommands::Day { day } => {
            let entries = service.get_day(&day_or_today(day))?;
            print_entries(session, &entries)
        }
        EntriesCommands::Range { start, end } => {
            let entries = service.get_range(&start, &end)?;
            print_entries(session, &entries)
        }
        EntriesCommands::Set {
            day,
            block,
            hour,
            kind,
            task,
        } => {
            let id = service.set_entry(&day, &block, hour, &task, kind)?;
            if session.json {
                return output::json(&id);
            }
            output::success(&format!("Saved {day} {block} as {kind}: {id}"));
            Ok(())
        }
        EntriesCommands::View { day } => {
            let day = day_or_today(day);
            let slots = service.day_view(&day)?;
            if session.json {
                return output::json(&slots);
            }
            println!("{}", day.long_label());
            for slot in &slots {
                let kind = if slot.entry_id.is_some() {
                    slot.kind.as_str()
                } else {
                    "-"
                };
                println!("{:<19}  {:<6} {}", slot.block.label, kind, slot.task);
            }
            Ok(())
        }
    }
}

fn print_entries(session: &Session, entries: &[Entry]) -> Result<()> {
    if session.json {
        return output::json(entries);
    }
    if entries.is_empty() {
        println!("No entries");
        return Ok(());
    }
    for entry in entries {
        println!(
            "{}  {:<8} {:<6} {}",
            entry.day, entry.block_id, entry.kind, entry.task
        );
    }
    Ok(())
}
