//! Session object that owns the connection and builds services.
//!
//! One context per caller; services borrow its connection, so they are
//! cheap to construct per operation.

use crate::clock::{Clock, SystemClock};
use crate::config::DaylogConfig;
use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::time_block::DEFAULT_DAY_START_HOUR;
use crate::repo::entry_repo::SqliteEntryRepository;
use crate::repo::project_repo::{SqliteDayProjectRepository, SqliteProjectRepository};
use crate::repo::project_task_repo::SqliteProjectTaskRepository;
use crate::repo::task_repo::SqliteTaskRepository;
use crate::repo::RepoResult;
use crate::service::entry_service::EntryService;
use crate::service::history_service::HistoryService;
use crate::service::project_service::ProjectService;
use crate::service::project_task_service::ProjectTaskService;
use crate::service::stats_service::StatsService;
use crate::service::task_service::TaskService;
use rusqlite::Connection;
use std::sync::Arc;

pub type SqliteEntryService<'conn> = EntryService<SqliteEntryRepository<'conn>>;
pub type SqliteTaskService<'conn> = TaskService<SqliteTaskRepository<'conn>>;
pub type SqliteProjectService<'conn> =
    ProjectService<SqliteProjectRepository<'conn>, SqliteDayProjectRepository<'conn>>;
pub type SqliteProjectTaskService<'conn> =
    ProjectTaskService<SqliteProjectTaskRepository<'conn>, SqliteProjectRepository<'conn>>;
pub type SqliteStatsService<'conn> =
    StatsService<SqliteProjectTaskRepository<'conn>, SqliteProjectRepository<'conn>>;
pub type SqliteHistoryService<'conn> = HistoryService<SqliteEntryRepository<'conn>>;

pub struct DaylogContext {
    conn: Connection,
    clock: Arc<dyn Clock>,
    day_start_hour: u8,
}

impl DaylogContext {
    /// Opens the configured database file.
    pub fn open(config: &DaylogConfig) -> DbResult<Self> {
        let conn = open_db(&config.db_path)?;
        Ok(Self::from_connection(conn).with_day_start_hour(config.day_start_hour))
    }

    pub fn in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an already migrated connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            clock: Arc::new(SystemClock),
            day_start_hour: DEFAULT_DAY_START_HOUR,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_day_start_hour(mut self, day_start_hour: u8) -> Self {
        self.day_start_hour = day_start_hour % 24;
        self
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn entries(&self) -> RepoResult<SqliteEntryService<'_>> {
        Ok(EntryService::with_day_start_hour(
            SqliteEntryRepository::try_new(&self.conn)?,
            self.day_start_hour,
        ))
    }

    pub fn tasks(&self) -> RepoResult<SqliteTaskService<'_>> {
        Ok(TaskService::with_clock(
            SqliteTaskRepository::try_new(&self.conn)?,
            Arc::clone(&self.clock),
        ))
    }

    pub fn projects(&self) -> RepoResult<SqliteProjectService<'_>> {
        Ok(ProjectService::with_clock(
            SqliteProjectRepository::try_new(&self.conn)?,
            SqliteDayProjectRepository::try_new(&self.conn)?,
            Arc::clone(&self.clock),
        ))
    }

    pub fn project_tasks(&self) -> RepoResult<SqliteProjectTaskService<'_>> {
        Ok(ProjectTaskService::with_clock(
            SqliteProjectTaskRepository::try_new(&self.conn)?,
            SqliteProjectRepository::try_new(&self.conn)?,
            Arc::clone(&self.clock),
        ))
    }

    pub fn stats(&self) -> RepoResult<SqliteStatsService<'_>> {
        Ok(StatsService::with_clock(
            SqliteProjectTaskRepository::try_new(&self.conn)?,
            SqliteProjectRepository::try_new(&self.conn)?,
            Arc::clone(&self.clock),
        ))
    }

    pub fn history(&self) -> RepoResult<SqliteHistoryService<'_>> {
        Ok(HistoryService::with_clock(
            SqliteEntryRepository::try_new(&self.conn)?,
            Arc::clone(&self.clock),
        ))
    }
}
