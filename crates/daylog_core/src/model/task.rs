//! Day-scoped to-do items and the carry-over rule.
//!
//! # Invariants
//! - A task is shown on its own day whether or not it is done.
//! - An unfinished task from an earlier day, or without a day, is shown on
//!   every later day until it is done. The stored record is never copied.

use crate::model::day_key::DayKey;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TaskId = Uuid;

/// Task row as stored. Older rows may lack `day`, `done` or `created_at`,
/// and the oldest ones carry `is_completed` instead of `done`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub id: TaskId,
    pub day: Option<DayKey>,
    pub text: String,
    pub done: Option<bool>,
    pub is_completed: Option<bool>,
    pub created_at: Option<i64>,
}

impl TaskRecord {
    pub fn new(day: DayKey, text: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            day: Some(day),
            text: text.into(),
            done: Some(false),
            is_completed: None,
            created_at: Some(created_at),
        }
    }

    /// `done`, falling back to the legacy `is_completed` flag, then `false`.
    pub fn is_done(&self) -> bool {
        self.done.or(self.is_completed).unwrap_or(false)
    }

    /// Whether this task belongs to the view of `day`.
    pub fn carries_into(&self, day: &DayKey) -> bool {
        match &self.day {
            Some(own) if own == day => true,
            Some(own) => !self.is_done() && own < day,
            None => !self.is_done(),
        }
    }

    /// Converts into the read model for the view of `day`.
    pub fn into_view(self, day: &DayKey) -> Task {
        let done = self.is_done();
        Task {
            id: self.id,
            day: self.day.unwrap_or_else(|| day.clone()),
            text: self.text,
            done,
            created_at: self.created_at.unwrap_or(0),
        }
    }
}

/// Task as returned by the day view, with defaults filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub day: DayKey,
    pub text: String,
    pub done: bool,
    pub created_at: i64,
}
