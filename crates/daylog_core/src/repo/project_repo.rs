//! Project repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - `projects`: named checklists with derived done state and completion
//!   timestamps.
//! - `project`: the legacy single-current-project-per-day table.
//!
//! # Invariants
//! - Project listing is `created_at ASC` with missing timestamps first,
//!   insertion order on ties.
//! - Completion counts are inclusive on both ends and skip rows without
//!   `completed_at`.

use crate::model::day_key::DayKey;
use crate::model::project::{DayProject, DayProjectId, ProjectId, ProjectRecord};
use crate::repo::{
    bool_to_int, ensure_connection_ready, parse_optional_bool, parse_optional_day, parse_uuid,
    RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    day,
    name,
    done,
    created_at,
    completed_at
FROM projects";

const DAY_PROJECT_SELECT_SQL: &str = "SELECT id, day, name, created_at FROM project";

/// Repository interface for projects.
pub trait ProjectRepository {
    fn list_projects(&self) -> RepoResult<Vec<ProjectRecord>>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<ProjectRecord>>;
    fn insert_project(&self, project: &ProjectRecord) -> RepoResult<ProjectId>;
    /// Writes `done` and `completed_at` together; `false` when id is unknown.
    fn set_project_completion(
        &self,
        id: ProjectId,
        done: bool,
        completed_at: Option<i64>,
    ) -> RepoResult<bool>;
    /// Counts projects with `completed_at` in `[start, end]`.
    fn count_projects_completed_between(&self, start: i64, end: i64) -> RepoResult<u64>;
}

/// Repository interface for the legacy per-day project table.
pub trait DayProjectRepository {
    /// Newest project for `day` by `created_at`.
    fn latest_for_day(&self, day: &DayKey) -> RepoResult<Option<DayProject>>;
    /// Most recently inserted project regardless of day.
    fn latest_inserted(&self) -> RepoResult<Option<DayProject>>;
    fn insert_day_project(&self, project: &DayProject) -> RepoResult<DayProjectId>;
    /// Replaces day, name and `created_at`; `false` when id is unknown.
    fn update_day_project(
        &self,
        id: DayProjectId,
        day: &DayKey,
        name: &str,
        created_at: i64,
    ) -> RepoResult<bool>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            "projects",
            &["id", "day", "name", "done", "created_at", "completed_at"],
        )?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn list_projects(&self) -> RepoResult<Vec<ProjectRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL}
             ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<ProjectRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }
        Ok(None)
    }

    fn insert_project(&self, project: &ProjectRecord) -> RepoResult<ProjectId> {
        self.conn.execute(
            "INSERT INTO projects (id, day, name, done, created_at, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                project.id.to_string(),
                project.day.as_ref().map(|day| day.as_str()),
                project.name.as_str(),
                project.done.map(bool_to_int),
                project.created_at,
                project.completed_at,
            ],
        )?;
        Ok(project.id)
    }

    fn set_project_completion(
        &self,
        id: ProjectId,
        done: bool,
        completed_at: Option<i64>,
    ) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE projects
             SET done = ?2, completed_at = ?3
             WHERE id = ?1;",
            params![id.to_string(), bool_to_int(done), completed_at],
        )?;
        Ok(changed > 0)
    }

    fn count_projects_completed_between(&self, start: i64, end: i64) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*)
             FROM projects
             WHERE completed_at >= ?1 AND completed_at <= ?2;",
            params![start, end],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<ProjectRecord> {
    let id_text: String = row.get("id")?;
    Ok(ProjectRecord {
        id: parse_uuid(&id_text, "projects.id")?,
        day: parse_optional_day(row.get("day")?, "projects.day")?,
        name: row.get("name")?,
        done: parse_optional_bool(row.get("done")?, "projects.done")?,
        created_at: row.get("created_at")?,
        completed_at: row.get("completed_at")?,
    })
}

/// SQLite-backed legacy per-day project repository.
pub struct SqliteDayProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDayProjectRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "project", &["id", "day", "name", "created_at"])?;
        Ok(Self { conn })
    }
}

impl DayProjectRepository for SqliteDayProjectRepository<'_> {
    fn latest_for_day(&self, day: &DayKey) -> RepoResult<Option<DayProject>> {
        let row = self
            .conn
            .query_row(
                &format!(
                    "{DAY_PROJECT_SELECT_SQL}
                     WHERE day = ?1
                     ORDER BY created_at DESC, rowid DESC
                     LIMIT 1;"
                ),
                [day.as_str()],
                read_day_project_columns,
            )
            .optional()?;
        row.map(parse_day_project_columns).transpose()
    }

    fn latest_inserted(&self) -> RepoResult<Option<DayProject>> {
        let row = self
            .conn
            .query_row(
                &format!(
                    "{DAY_PROJECT_SELECT_SQL}
                     ORDER BY rowid DESC
                     LIMIT 1;"
                ),
                [],
                read_day_project_columns,
            )
            .optional()?;
        row.map(parse_day_project_columns).transpose()
    }

    fn insert_day_project(&self, project: &DayProject) -> RepoResult<DayProjectId> {
        self.conn.execute(
            "INSERT INTO project (id, day, name, created_at) VALUES (?1, ?2, ?3, ?4);",
            params![
                project.id.to_string(),
                project.day.as_ref().map(|day| day.as_str()),
                project.name.as_deref(),
                project.created_at,
            ],
        )?;
        Ok(project.id)
    }

    fn update_day_project(
        &self,
        id: DayProjectId,
        day: &DayKey,
        name: &str,
        created_at: i64,
    ) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE project SET day = ?2, name = ?3, created_at = ?4 WHERE id = ?1;",
            params![id.to_string(), day.as_str(), name, created_at],
        )?;
        Ok(changed > 0)
    }
}

type DayProjectColumns = (String, Option<String>, Option<String>, Option<i64>);

fn read_day_project_columns(row: &Row<'_>) -> rusqlite::Result<DayProjectColumns> {
    Ok((
        row.get("id")?,
        row.get("day")?,
        row.get("name")?,
        row.get("created_at")?,
    ))
}

fn parse_day_project_columns(
    (id, day, name, created_at): DayProjectColumns,
) -> RepoResult<DayProject> {
    Ok(DayProject {
        id: parse_uuid(&id, "project.id")?,
        day: parse_optional_day(day, "project.day")?,
        name,
        created_at,
    })
}
