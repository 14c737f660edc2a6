//! Day task repository contracts and SQLite implementation.
//!
//! The carry-over view spans every stored task, so the read side exposes a
//! full scan in insertion order rather than a per-day query.

use crate::model::task::{TaskId, TaskRecord};
use crate::repo::{
    bool_to_int, ensure_connection_ready, parse_optional_bool, parse_optional_day, parse_uuid,
    RepoResult,
};
use rusqlite::{params, Connection, Row};

/// Repository interface for day tasks.
pub trait TaskRepository {
    /// Lists every stored task in insertion order.
    fn list_all_tasks(&self) -> RepoResult<Vec<TaskRecord>>;
    /// Persists a task record as given and returns its id.
    fn insert_task(&self, task: &TaskRecord) -> RepoResult<TaskId>;
    /// Sets `done`; returns `false` when no task has this id.
    fn set_task_done(&self, id: TaskId, done: bool) -> RepoResult<bool>;
}

/// SQLite-backed day task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            "tasks",
            &["id", "day", "text", "done", "is_completed", "created_at"],
        )?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn list_all_tasks(&self) -> RepoResult<Vec<TaskRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, day, text, done, is_completed, created_at
             FROM tasks
             ORDER BY rowid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn insert_task(&self, task: &TaskRecord) -> RepoResult<TaskId> {
        self.conn.execute(
            "INSERT INTO tasks (id, day, text, done, is_completed, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                task.id.to_string(),
                task.day.as_ref().map(|day| day.as_str()),
                task.text.as_str(),
                task.done.map(bool_to_int),
                task.is_completed.map(bool_to_int),
                task.created_at,
            ],
        )?;
        Ok(task.id)
    }

    fn set_task_done(&self, id: TaskId, done: bool) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE tasks SET done = ?2 WHERE id = ?1;",
            params![id.to_string(), bool_to_int(done)],
        )?;
        Ok(changed > 0)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<TaskRecord> {
    let id_text: String = row.get("id")?;
    Ok(TaskRecord {
        id: parse_uuid(&id_text, "tasks.id")?,
        day: parse_optional_day(row.get("day")?, "tasks.day")?,
        text: row.get("text")?,
        done: parse_optional_bool(row.get("done")?, "tasks.done")?,
        is_completed: parse_optional_bool(row.get("is_completed")?, "tasks.is_completed")?,
        created_at: row.get("created_at")?,
    })
}
