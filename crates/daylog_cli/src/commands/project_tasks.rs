//! Project-tasks command - project checklists

use anyhow::Result;
use clap::{ArgAction, Subcommand};
use daylog_core::{ProjectId, ProjectTaskId};

use super::Session;
use crate::output;

#[derive(Subcommand)]
pub enum ProjectTasksCommands {
    /// Checklist of a project, oldest first
    List {
        /// Project id
        project: ProjectId,
    },

    /// Add an open item to a project
    Add {
        /// Project id
        project: ProjectId,
        /// Item text
        text: String,
    },

    /// Mark an item done or open
    Toggle {
        /// Item id
        id: ProjectTaskId,
        /// New done state
        #[arg(long, action = ArgAction::Set)]
        done: bool,
    },

    /// Number of items completed between two epoch-ms instants, inclusive
    Completed {
        /// Start (epoch milliseconds)
        start: i64,
        /// End (epoch milliseconds)
        end: i64,
    },
}

pub fn run(session: &Session, command: ProjectTasksCommands) -> Result<()> {
    let service = session.ctx.project_tasks()?;
    match command {
        ProjectTasksCommands::List { project } => {
            let tasks = service.get_for_project(project)?;
            if session.json {
                return output::json(&tasks);
            }
            if tasks.is_empty() {
                println!("No items");
            }
            for task in &tasks {
                println!(
                    "{} {}  {}",
                    output::check(task.done),
                    task.id,
                    task.text
                );
            }
            Ok(())
        }
        ProjectTasksCommands::Add { project, text } => {
            let Some(text) = output::non_empty(&text) else {
                output::warning("empty item text, nothing added");
                return Ok(());
            };
            let id = service.add(project, text)?;
            if session.json {
                return output::json(&id);
            }
            output::success(&format!("Added item {id}"));
            Ok(())
        }
        ProjectTasksCommands::Toggle { id, done } => {
            service.toggle(id, done)?;
            if session.json {
                return output::json(&serde_json::json!({ "id": id, "done": done }));
            }
            output::success(&format!("Item {id} done={done}"));
            Ok(())
        }
        ProjectTasksCommands::Completed { start, end } => {
            let count = service.get_completed_in_time_range(start, end)?;
            if session.json {
                return output::json(&count);
            }
            println!("{count}");
            Ok(())
        }
    }
}
