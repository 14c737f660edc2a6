//! Project checklist use-case service.
//!
//! # Invariants
//! - Every add/toggle is followed by `recompute_project_done` on the parent.
//! - The recompute reads the checklist after the write and is idempotent.
//! - Unknown task ids and missing parent projects are silent no-ops.

use crate::clock::{Clock, SystemClock};
use crate::model::project::{
    completion_stamp, derive_project_done, ProjectId, ProjectTask, ProjectTaskId,
    ProjectTaskRecord,
};
use crate::repo::project_repo::ProjectRepository;
use crate::repo::project_task_repo::ProjectTaskRepository;
use crate::repo::RepoResult;
use log::debug;
use std::sync::Arc;

/// Use-case service for project checklist items.
pub struct ProjectTaskService<T: ProjectTaskRepository, P: ProjectRepository> {
    tasks: T,
    projects: P,
    clock: Arc<dyn Clock>,
}

impl<T: ProjectTaskRepository, P: ProjectRepository> ProjectTaskService<T, P> {
    pub fn new(tasks: T, projects: P) -> Self {
        Self::with_clock(tasks, projects, Arc::new(SystemClock))
    }

    pub fn with_clock(tasks: T, projects: P, clock: Arc<dyn Clock>) -> Self {
        Self {
            tasks,
            projects,
            clock,
        }
    }

    /// Checklist of one project by creation time, defaults filled.
    pub fn get_for_project(&self, project_id: ProjectId) -> RepoResult<Vec<ProjectTask>> {
        Ok(self
            .tasks
            .list_for_project(project_id)?
            .into_iter()
            .map(ProjectTaskRecord::into_view)
            .collect())
    }

    /// Adds an open item with trimmed text, then recomputes the project.
    pub fn add(&self, project_id: ProjectId, text: &str) -> RepoResult<ProjectTaskId> {
        let task = ProjectTaskRecord::new(project_id, text.trim(), self.clock.now_ms());
        let id = self.tasks.insert_project_task(&task)?;
        self.recompute_project_done(project_id)?;
        Ok(id)
    }

    /// Sets the done flag of one item, then recomputes its project.
    pub fn toggle(&self, id: ProjectTaskId, done: bool) -> RepoResult<()> {
        let Some(task) = self.tasks.get_project_task(id)? else {
            debug!(
                "event=project_task_toggle module=project_tasks status=skipped reason=not_found"
            );
            return Ok(());
        };
        let completed_at = completion_stamp(done, task.completed_at, self.clock.now_ms());
        self.tasks
            .set_project_task_completion(id, done, completed_at)?;
        self.recompute_project_done(task.project_id)?;
        Ok(())
    }

    /// Recomputes and persists the derived done state of a project.
    ///
    /// Returns the new state, or `None` when the project does not exist.
    pub fn recompute_project_done(&self, project_id: ProjectId) -> RepoResult<Option<bool>> {
        let checklist = self.tasks.list_for_project(project_id)?;
        let all_done = derive_project_done(&checklist);

        let Some(project) = self.projects.get_project(project_id)? else {
            debug!(
                "event=project_recompute module=project_tasks status=skipped reason=project_not_found"
            );
            return Ok(None);
        };

        let completed_at = completion_stamp(all_done, project.completed_at, self.clock.now_ms());
        self.projects
            .set_project_completion(project_id, all_done, completed_at)?;
        debug!(
            "event=project_recompute module=project_tasks status=ok tasks={} done={}",
            checklist.len(),
            all_done
        );
        Ok(Some(all_done))
    }

    /// Number of items completed within `[start, end]` (epoch ms).
    pub fn get_completed_in_time_range(&self, start: i64, end: i64) -> RepoResult<u64> {
        self.tasks.count_tasks_completed_between(start, end)
    }
}
