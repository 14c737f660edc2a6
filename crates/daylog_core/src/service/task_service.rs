//! Day task list use-case service.
//!
//! # Invariants
//! - The day view is computed from every stored task on each read.
//! - Toggling an unknown task is a silent no-op.

use crate::clock::{Clock, SystemClock};
use crate::model::day_key::DayKey;
use crate::model::task::{Task, TaskId, TaskRecord};
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoResult;
use log::debug;
use std::sync::Arc;

/// Use-case service for the day task list.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    clock: Arc<dyn Clock>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, Arc::new(SystemClock))
    }

    pub fn with_clock(repo: R, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Tasks shown on `day`: the day's own tasks plus unfinished tasks
    /// carried over from earlier or undated days, by `created_at`.
    pub fn get_day(&self, day: &DayKey) -> RepoResult<Vec<Task>> {
        let mut tasks = self
            .repo
            .list_all_tasks()?
            .into_iter()
            .filter(|task| task.carries_into(day))
            .map(|task| task.into_view(day))
            .collect::<Vec<_>>();
        tasks.sort_by_key(|task| task.created_at);
        Ok(tasks)
    }

    /// Adds an open task to `day`.
    pub fn add(&self, day: &DayKey, text: &str) -> RepoResult<TaskId> {
        let task = TaskRecord::new(day.clone(), text, self.clock.now_ms());
        let id = self.repo.insert_task(&task)?;
        debug!("event=task_add module=tasks status=ok day={}", day);
        Ok(id)
    }

    /// Sets the done flag of one task.
    pub fn toggle(&self, id: TaskId, done: bool) -> RepoResult<()> {
        if !self.repo.set_task_done(id, done)? {
            debug!("event=task_toggle module=tasks status=skipped reason=not_found");
        }
        Ok(())
    }

    /// Number of unfinished tasks in the view of `day`.
    pub fn pending_count(&self, day: &DayKey) -> RepoResult<usize> {
        Ok(self
            .get_day(day)?
            .iter()
            .filter(|task| !task.done)
            .count())
    }
}
