//! Entry repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `(day, block_id)` is unique; `upsert_entry` never creates a second row
//!   for a pair and returns the id of the row it touched.
//! - Day listings are ordered by `start_hour ASC`, insertion order on ties.

use crate::model::day_key::DayKey;
use crate::model::entry::{Entry, EntryId, EntryType, EntryUpsert};
use crate::repo::{ensure_connection_ready, parse_day, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    day,
    block_id,
    start_hour,
    task,
    type
FROM entries";

/// Repository interface for hourly entries.
pub trait EntryRepository {
    /// Lists all entries of one day.
    fn list_day(&self, day: &DayKey) -> RepoResult<Vec<Entry>>;
    /// Lists entries whose day lies in `[start, end]`, inclusive.
    fn list_range(&self, start: &DayKey, end: &DayKey) -> RepoResult<Vec<Entry>>;
    /// Inserts or updates the entry at `(day, block_id)`.
    fn upsert_entry(&self, upsert: &EntryUpsert) -> RepoResult<EntryId>;
}

/// SQLite-backed entry repository.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            "entries",
            &["id", "day", "block_id", "start_hour", "task", "type"],
        )?;
        Ok(Self { conn })
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn list_day(&self, day: &DayKey) -> RepoResult<Vec<Entry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_SELECT_SQL}
             WHERE day = ?1
             ORDER BY start_hour ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([day.as_str()])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }
        Ok(entries)
    }

    fn list_range(&self, start: &DayKey, end: &DayKey) -> RepoResult<Vec<Entry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_SELECT_SQL}
             WHERE day >= ?1 AND day <= ?2
             ORDER BY day ASC, start_hour ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([start.as_str(), end.as_str()])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }
        Ok(entries)
    }

    fn upsert_entry(&self, upsert: &EntryUpsert) -> RepoResult<EntryId> {
        if upsert.start_hour > 23 {
            return Err(RepoError::InvalidInput(format!(
                "start hour {} is outside 0..=23",
                upsert.start_hour
            )));
        }

        let id_text: String = self.conn.query_row(
            "INSERT INTO entries (id, day, block_id, start_hour, task, type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT (day, block_id) DO UPDATE SET
                start_hour = excluded.start_hour,
                task = excluded.task,
                type = excluded.type
             RETURNING id;",
            params![
                Uuid::new_v4().to_string(),
                upsert.day.as_str(),
                upsert.block_id.as_str(),
                i64::from(upsert.start_hour),
                upsert.task.as_str(),
                upsert.kind.as_str(),
            ],
            |row| row.get(0),
        )?;

        parse_uuid(&id_text, "entries.id")
    }
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<Entry> {
    let id_text: String = row.get("id")?;
    let day_text: String = row.get("day")?;

    let start_hour_raw: i64 = row.get("start_hour")?;
    let start_hour = u8::try_from(start_hour_raw)
        .ok()
        .filter(|hour| *hour <= 23)
        .ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid start hour `{start_hour_raw}` in entries.start_hour"
            ))
        })?;

    let type_text: String = row.get("type")?;
    let kind = type_text.parse::<EntryType>().map_err(|_| {
        RepoError::InvalidData(format!("invalid entry type `{type_text}` in entries.type"))
    })?;

    Ok(Entry {
        id: parse_uuid(&id_text, "entries.id")?,
        day: parse_day(&day_text, "entries.day")?,
        block_id: row.get("block_id")?,
        start_hour,
        task: row.get("task")?,
        kind,
    })
}
