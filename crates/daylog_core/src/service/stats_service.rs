//! Completion statistics for the dashboard.
//!
//! # Responsibility
//! - Derive week/month/quarter/year window starts from "now".
//! - Count completed project tasks and projects inside each window.
//!
//! # Invariants
//! - Weeks start on Monday 00:00; Sunday belongs to the week before it.
//! - Every window ends at "now" and both ends are inclusive.

use crate::clock::{Clock, SystemClock};
use crate::repo::project_repo::ProjectRepository;
use crate::repo::project_task_repo::ProjectTaskRepository;
use crate::repo::{RepoError, RepoResult};
use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use log::info;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Window starts in epoch milliseconds, all ending at `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsWindows {
    pub week_start: i64,
    pub month_start: i64,
    pub quarter_start: i64,
    pub year_start: i64,
    pub end: i64,
}

impl StatsWindows {
    /// Windows for `now`, using the calendar of `now`'s time zone.
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let today = now.date_naive();

        let week = today
            .checked_sub_days(Days::new(u64::from(
                today.weekday().num_days_from_monday(),
            )))
            .unwrap_or(today);
        let month = today.with_day(1).unwrap_or(today);
        let quarter = month
            .with_month(month.month0() / 3 * 3 + 1)
            .unwrap_or(month);
        let year = month.with_month(1).unwrap_or(month);

        Self {
            week_start: start_of_day(&tz, week),
            month_start: start_of_day(&tz, month),
            quarter_start: start_of_day(&tz, quarter),
            year_start: start_of_day(&tz, year),
            end: now.timestamp_millis(),
        }
    }
}

/// Completion counts for the four windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WindowCounts {
    pub week: u64,
    pub month: u64,
    pub quarter: u64,
    pub year: u64,
}

/// Dashboard snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    pub windows: StatsWindows,
    pub project_tasks: WindowCounts,
    pub projects: WindowCounts,
}

/// Aggregates completion counts and keeps the latest snapshot.
pub struct StatsService<T: ProjectTaskRepository, P: ProjectRepository> {
    tasks: T,
    projects: P,
    clock: Arc<dyn Clock>,
    latest: Option<CompletionStats>,
}

impl<T: ProjectTaskRepository, P: ProjectRepository> StatsService<T, P> {
    pub fn new(tasks: T, projects: P) -> Self {
        Self::with_clock(tasks, projects, Arc::new(SystemClock))
    }

    pub fn with_clock(tasks: T, projects: P, clock: Arc<dyn Clock>) -> Self {
        Self {
            tasks,
            projects,
            clock,
            latest: None,
        }
    }

    /// Last computed snapshot, if any.
    pub fn stats(&self) -> Option<&CompletionStats> {
        self.latest.as_ref()
    }

    /// Recomputes the snapshot for the clock's "now" in the local time zone.
    pub fn refresh(&mut self) -> RepoResult<&CompletionStats> {
        let now_ms = self.clock.now_ms();
        let now = Local.timestamp_millis_opt(now_ms).single().ok_or_else(|| {
            RepoError::InvalidInput(format!("clock time {now_ms} is not a valid local time"))
        })?;
        self.refresh_at(&now)
    }

    /// Recomputes the snapshot for an explicit "now".
    pub fn refresh_at<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> RepoResult<&CompletionStats> {
        let started_at = Instant::now();
        let windows = StatsWindows::at(now);
        let end = windows.end;

        let project_tasks = WindowCounts {
            week: self.tasks.count_tasks_completed_between(windows.week_start, end)?,
            month: self.tasks.count_tasks_completed_between(windows.month_start, end)?,
            quarter: self.tasks.count_tasks_completed_between(windows.quarter_start, end)?,
            year: self.tasks.count_tasks_completed_between(windows.year_start, end)?,
        };
        let projects = WindowCounts {
            week: self.projects.count_projects_completed_between(windows.week_start, end)?,
            month: self.projects.count_projects_completed_between(windows.month_start, end)?,
            quarter: self
                .projects
                .count_projects_completed_between(windows.quarter_start, end)?,
            year: self.projects.count_projects_completed_between(windows.year_start, end)?,
        };

        info!(
            "event=stats_refresh module=stats status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(&*self.latest.insert(CompletionStats {
            windows,
            project_tasks,
            projects,
        }))
    }
}

fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    if let Some(start) = tz.from_local_datetime(&midnight).earliest() {
        return start.timestamp_millis();
    }
    // Midnight skipped by a DST jump: the day starts at the first valid hour.
    let first_hour = midnight + TimeDelta::hours(1);
    tz.from_local_datetime(&first_hour)
        .earliest()
        .map_or_else(|| midnight.and_utc().timestamp_millis(), |start| {
            start.timestamp_millis()
        })
}
