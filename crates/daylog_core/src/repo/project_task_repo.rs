//! Project checklist repository contracts and SQLite implementation.

use crate::model::project::{ProjectId, ProjectTaskId, ProjectTaskRecord};
use crate::repo::{
    bool_to_int, ensure_connection_ready, parse_optional_bool, parse_uuid, RepoResult,
};
use rusqlite::{params, Connection, Row};

const PROJECT_TASK_SELECT_SQL: &str = "SELECT
    id,
    project_id,
    text,
    done,
    created_at,
    completed_at
FROM project_tasks";

/// Repository interface for project checklist items.
pub trait ProjectTaskRepository {
    /// Lists tasks of one project by `created_at ASC`, insertion order on ties.
    fn list_for_project(&self, project_id: ProjectId) -> RepoResult<Vec<ProjectTaskRecord>>;
    fn get_project_task(&self, id: ProjectTaskId) -> RepoResult<Option<ProjectTaskRecord>>;
    fn insert_project_task(&self, task: &ProjectTaskRecord) -> RepoResult<ProjectTaskId>;
    /// Writes `done` and `completed_at` together; `false` when id is unknown.
    fn set_project_task_completion(
        &self,
        id: ProjectTaskId,
        done: bool,
        completed_at: Option<i64>,
    ) -> RepoResult<bool>;
    /// Counts tasks with `completed_at` in `[start, end]`.
    fn count_tasks_completed_between(&self, start: i64, end: i64) -> RepoResult<u64>;
}

/// SQLite-backed project checklist repository.
pub struct SqliteProjectTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectTaskRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            "project_tasks",
            &["id", "project_id", "text", "done", "created_at", "completed_at"],
        )?;
        Ok(Self { conn })
    }
}

impl ProjectTaskRepository for SqliteProjectTaskRepository<'_> {
    fn list_for_project(&self, project_id: ProjectId) -> RepoResult<Vec<ProjectTaskRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_TASK_SELECT_SQL}
             WHERE project_id = ?1
             ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([project_id.to_string()])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_project_task_row(row)?);
        }
        Ok(tasks)
    }

    fn get_project_task(&self, id: ProjectTaskId) -> RepoResult<Option<ProjectTaskRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_task_row(row)?));
        }
        Ok(None)
    }

    fn insert_project_task(&self, task: &ProjectTaskRecord) -> RepoResult<ProjectTaskId> {
        self.conn.execute(
            "INSERT INTO project_tasks (id, project_id, text, done, created_at, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                task.id.to_string(),
                task.project_id.to_string(),
                task.text.as_str(),
                task.done.map(bool_to_int),
                task.created_at,
                task.completed_at,
            ],
        )?;
        Ok(task.id)
    }

    fn set_project_task_completion(
        &self,
        id: ProjectTaskId,
        done: bool,
        completed_at: Option<i64>,
    ) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE project_tasks
             SET done = ?2, completed_at = ?3
             WHERE id = ?1;",
            params![id.to_string(), bool_to_int(done), completed_at],
        )?;
        Ok(changed > 0)
    }

    fn count_tasks_completed_between(&self, start: i64, end: i64) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*)
             FROM project_tasks
             WHERE completed_at >= ?1 AND completed_at <= ?2;",
            params![start, end],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

fn parse_project_task_row(row: &Row<'_>) -> RepoResult<ProjectTaskRecord> {
    let id_text: String = row.get("id")?;
    let project_text: String = row.get("project_id")?;
    Ok(ProjectTaskRecord {
        id: parse_uuid(&id_text, "project_tasks.id")?,
        project_id: parse_uuid(&project_text, "project_tasks.project_id")?,
        text: row.get("text")?,
        done: parse_optional_bool(row.get("done")?, "project_tasks.done")?,
        created_at: row.get("created_at")?,
        completed_at: row.get("completed_at")?,
    })
}
