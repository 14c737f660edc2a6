//! Tasks command - day task list

use anyhow::Result;
use clap::{ArgAction, Subcommand};
use daylog_core::{DayKey, TaskId};

use super::{day_or_today, Session};
use crate::output;

#[derive(Subcommand)]
pub enum TasksCommands {
    /// Tasks visible on a day, open tasks from earlier days included
    Day {
        /// Day key (YYYY-MM-DD), defaults to today
        day: Option<DayKey>,
    },

    /// Add an open task
    Add {
        /// Task text
        text: String,
        /// Day key (YYYY-MM-DD), defaults to today
        #[arg(long)]
        day: Option<DayKey>,
    },

    /// Mark a task done or open
    Toggle {
        /// Task id
        id: TaskId,
        /// New done state
        #[arg(long, action = ArgAction::Set)]
        done: bool,
    },
}

pub fn run(session: &Session, command: TasksCommands) -> Result<()> {
    let service = session.ctx.tasks()?;
    match command {
        TasksCommands::Day { day } => {
            let day = day_or_today(day);
            let tasks = service.get_day(&day)?;
            if session.json {
                return output::json(&tasks);
            }
            println!("{}", day.long_label());
            if tasks.is_empty() {
                println!("No tasks");
            }
            for task in &tasks {
                let origin = if task.day == day {
                    String::new()
                } else {
                    format!("  (from {})", task.day.compact_label())
                };
                println!(
                    "{} {}  {}{}",
                    output::check(task.done),
                    task.id,
                    task.text,
                    origin
                );
            }
            Ok(())
        }
        TasksCommands::Add { text, day } => {
            let Some(text) = output::non_empty(&text) else {
                output::warning("empty task text, nothing added");
                return Ok(());
            };
            let id = service.add(&day_or_today(day), text)?;
            if session.json {
                return output::json(&id);
            }
            output::success(&format!("Added task {id}"));
            Ok(())
        }
        TasksCommands::Toggle { id, done } => {
            service.toggle(id, done)?;
            if session.json {
                return output::json(&serde_json::json!({ "id": id, "done": done }));
            }
            output::success(&format!("Task {id} done={done}"));
            Ok(())
        }
    }
}
