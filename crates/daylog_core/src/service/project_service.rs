//! Project use-case service.
//!
//! # Responsibility
//! - Manage named projects and their completion timestamps.
//! - Serve the legacy "project of the day" lookups.
//!
//! # Invariants
//! - `completed_at` follows `completion_stamp`: first completion is kept,
//!   un-completing clears it.
//! - `set_done` on an unknown id is a silent no-op.

use crate::clock::{Clock, SystemClock};
use crate::model::day_key::DayKey;
use crate::model::project::{
    completion_stamp, DayProject, DayProjectId, Project, ProjectId, ProjectRecord,
};
use crate::repo::project_repo::{DayProjectRepository, ProjectRepository};
use crate::repo::RepoResult;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

/// Use-case service for projects and the legacy per-day project.
pub struct ProjectService<P: ProjectRepository, D: DayProjectRepository> {
    projects: P,
    day_projects: D,
    clock: Arc<dyn Clock>,
}

impl<P: ProjectRepository, D: DayProjectRepository> ProjectService<P, D> {
    pub fn new(projects: P, day_projects: D) -> Self {
        Self::with_clock(projects, day_projects, Arc::new(SystemClock))
    }

    pub fn with_clock(projects: P, day_projects: D, clock: Arc<dyn Clock>) -> Self {
        Self {
            projects,
            day_projects,
            clock,
        }
    }

    /// Legacy lookup of the project for `day`.
    ///
    /// Falls back to the most recently inserted project of any day when
    /// `day` has none. The fallback can surface another day's project.
    pub fn get_by_day(&self, day: &DayKey) -> RepoResult<Option<DayProject>> {
        if let Some(current) = self.day_projects.latest_for_day(day)? {
            return Ok(Some(current));
        }
        self.day_projects.latest_inserted()
    }

    /// Renames the project of `day`, or creates one.
    pub fn set(&self, day: &DayKey, name: &str) -> RepoResult<DayProjectId> {
        let now = self.clock.now_ms();
        if let Some(existing) = self.day_projects.latest_for_day(day)? {
            self.day_projects
                .update_day_project(existing.id, day, name, now)?;
            return Ok(existing.id);
        }

        self.day_projects.insert_day_project(&DayProject {
            id: Uuid::new_v4(),
            day: Some(day.clone()),
            name: Some(name.to_string()),
            created_at: Some(now),
        })
    }

    /// All projects by creation time, defaults filled.
    pub fn get_all(&self) -> RepoResult<Vec<Project>> {
        Ok(self
            .projects
            .list_projects()?
            .into_iter()
            .map(ProjectRecord::into_view)
            .collect())
    }

    /// Creates an open project with a trimmed name.
    pub fn add(&self, name: &str) -> RepoResult<ProjectId> {
        let project = ProjectRecord::new(name.trim(), self.clock.now_ms());
        let id = self.projects.insert_project(&project)?;
        debug!("event=project_add module=projects status=ok");
        Ok(id)
    }

    /// Sets the done flag and stamps or clears `completed_at`.
    pub fn set_done(&self, id: ProjectId, done: bool) -> RepoResult<()> {
        let Some(project) = self.projects.get_project(id)? else {
            debug!("event=project_set_done module=projects status=skipped reason=not_found");
            return Ok(());
        };
        let completed_at = completion_stamp(done, project.completed_at, self.clock.now_ms());
        self.projects.set_project_completion(id, done, completed_at)?;
        Ok(())
    }

    /// Number of projects completed within `[start, end]` (epoch ms).
    pub fn get_completed_in_time_range(&self, start: i64, end: i64) -> RepoResult<u64> {
        self.projects.count_projects_completed_between(start, end)
    }
}
