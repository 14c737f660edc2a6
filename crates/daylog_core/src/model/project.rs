//! Projects, project checklist items and the legacy per-day project.
//!
//! # Invariants
//! - A project's `done` is derived: true iff it has at least one task and
//!   every task is done.
//! - `completed_at` is stamped on the first transition to done, kept while
//!   done, and cleared when done is unset.

use crate::model::day_key::DayKey;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ProjectId = Uuid;
pub type ProjectTaskId = Uuid;
pub type DayProjectId = Uuid;

/// Row of the legacy single-current-project table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayProject {
    pub id: DayProjectId,
    pub day: Option<DayKey>,
    pub name: Option<String>,
    pub created_at: Option<i64>,
}

/// Project row as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub day: Option<DayKey>,
    pub name: String,
    pub done: Option<bool>,
    pub created_at: Option<i64>,
    pub completed_at: Option<i64>,
}

impl ProjectRecord {
    pub fn new(name: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            day: None,
            name: name.into(),
            done: Some(false),
            created_at: Some(created_at),
            completed_at: None,
        }
    }

    pub fn into_view(self) -> Project {
        Project {
            id: self.id,
            day: self.day,
            name: self.name,
            done: self.done.unwrap_or(false),
            created_at: self.created_at.unwrap_or(0),
            completed_at: self.completed_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub day: Option<DayKey>,
    pub name: String,
    pub done: bool,
    pub created_at: i64,
    pub completed_at: Option<i64>,
}

/// Project checklist row as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTaskRecord {
    pub id: ProjectTaskId,
    pub project_id: ProjectId,
    pub text: String,
    pub done: Option<bool>,
    pub created_at: Option<i64>,
    pub completed_at: Option<i64>,
}

impl ProjectTaskRecord {
    pub fn new(project_id: ProjectId, text: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            text: text.into(),
            done: Some(false),
            created_at: Some(created_at),
            completed_at: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done.unwrap_or(false)
    }

    pub fn into_view(self) -> ProjectTask {
        let done = self.is_done();
        ProjectTask {
            id: self.id,
            project_id: self.project_id,
            text: self.text,
            done,
            created_at: self.created_at.unwrap_or(0),
            completed_at: self.completed_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTask {
    pub id: ProjectTaskId,
    pub project_id: ProjectId,
    pub text: String,
    pub done: bool,
    pub created_at: i64,
    pub completed_at: Option<i64>,
}

/// Completion timestamp after setting `done`.
pub fn completion_stamp(done: bool, previous: Option<i64>, now: i64) -> Option<i64> {
    if done {
        previous.or(Some(now))
    } else {
        None
    }
}

/// Derived project state from its checklist.
pub fn derive_project_done(tasks: &[ProjectTaskRecord]) -> bool {
    !tasks.is_empty() && tasks.iter().all(ProjectTaskRecord::is_done)
}

#[cfg(test)]
mod tests {
    use super::{completion_stamp, derive_project_done, ProjectTaskRecord};
    use uuid::Uuid;

    #[test]
    fn completion_stamp_keeps_first_completion() {
        assert_eq!(completion_stamp(true, None, 10), Some(10));
        assert_eq!(completion_stamp(true, Some(10), 20), Some(10));
        assert_eq!(completion_stamp(false, Some(10), 30), None);
    }

    #[test]
    fn empty_checklist_is_never_done() {
        assert!(!derive_project_done(&[]));

        let project_id = Uuid::new_v4();
        let mut first = ProjectTaskRecord::new(project_id, "a", 1);
        let mut second = ProjectTaskRecord::new(project_id, "b", 2);
        first.done = Some(true);
        second.done = None;
        assert!(!derive_project_done(&[first.clone(), second.clone()]));

        second.done = Some(true);
        assert!(derive_project_done(&[first, second]));
    }
}
