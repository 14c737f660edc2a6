//! Core domain logic for Daylog: hourly signal/noise logging, day task
//! lists with carry-over, project checklists and completion statistics.

pub mod clock;
pub mod config;
pub mod context;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, DaylogConfig, SettingsFile};
pub use context::DaylogContext;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::day_key::{DayKey, DayKeyError};
pub use model::entry::{Entry, EntryId, EntryType, EntryTypeError, EntryUpsert};
pub use model::project::{
    DayProject, DayProjectId, Project, ProjectId, ProjectRecord, ProjectTask, ProjectTaskId,
    ProjectTaskRecord,
};
pub use model::task::{Task, TaskId, TaskRecord};
pub use model::time_block::{BlockSlot, TimeBlock, DEFAULT_DAY_START_HOUR};
pub use repo::entry_repo::{EntryRepository, SqliteEntryRepository};
pub use repo::project_repo::{
    DayProjectRepository, ProjectRepository, SqliteDayProjectRepository, SqliteProjectRepository,
};
pub use repo::project_task_repo::{ProjectTaskRepository, SqliteProjectTaskRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::entry_service::{BlockEdit, EntryService};
pub use service::history_service::{HistoryRange, HistoryService, SignalHistory, TypeTally};
pub use service::project_service::ProjectService;
pub use service::project_task_service::ProjectTaskService;
pub use service::stats_service::{CompletionStats, StatsService, StatsWindows, WindowCounts};
pub use service::task_service::TaskService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
