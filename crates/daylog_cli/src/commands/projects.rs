//! Project commands - legacy day project and the project list

use anyhow::Result;
use clap::{ArgAction, Subcommand};
use daylog_core::{DayKey, ProjectId};

use super::{day_or_today, Session};
use crate::output;

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Project recorded for a day
    Get {
        /// Day key (YYYY-MM-DD), defaults to today
        day: Option<DayKey>,
    },

    /// Record or rename the project of a day
    Set {
        /// Project name
        name: String,
        /// Day key (YYYY-MM-DD), defaults to today
        #[arg(long)]
        day: Option<DayKey>,
    },
}

#[derive(Subcommand)]
pub enum ProjectsCommands {
    /// All projects, oldest first
    List,

    /// Add an open project
    Add {
        /// Project name
        name: String,
    },

    /// Mark a project done or open
    Done {
        /// Project id
        id: ProjectId,
        /// New done state
        #[arg(long, action = ArgAction::Set)]
        done: bool,
    },

    /// Number of projects completed between two epoch-ms instants, inclusive
    Completed {
        /// Start (epoch milliseconds)
        start: i64,
        /// End (epoch milliseconds)
        end: i64,
    },
}

pub fn run_day_project(session: &Session, command: ProjectCommands) -> Result<()> {
    let service = session.ctx.projects()?;
    match command {
        ProjectCommands::Get { day } => {
            let project = service.get_by_day(&day_or_today(day))?;
            if session.json {
                return output::json(&project);
            }
            match project.and_then(|project| project.name) {
                Some(name) => println!("{name}"),
                None => println!("No project"),
            }
            Ok(())
        }
        ProjectCommands::Set { name, day } => {
            let Some(name) = output::non_empty(&name) else {
                output::warning("empty project name, nothing saved");
                return Ok(());
            };
            let day = day_or_today(day);
            let id = service.set(&day, name)?;
            if session.json {
                return output::json(&id);
            }
            output::success(&format!("Project for {day}: {name}"));
            Ok(())
        }
    }
}

pub fn run(session: &Session, command: ProjectsCommands) -> Result<()> {
    let service = session.ctx.projects()?;
    match command {
        ProjectsCommands::List => {
            let projects = service.get_all()?;
            if session.json {
                return output::json(&projects);
            }
            if projects.is_empty() {
                println!("No projects");
            }
            for project in &projects {
                println!(
                    "{} {}  {}",
                    output::check(project.done),
                    project.id,
                    project.name
                );
            }
            Ok(())
        }
        ProjectsCommands::Add { name } => {
            let Some(name) = output::non_empty(&name) else {
                output::warning("empty project name, nothing added");
                return Ok(());
            };
            let id = service.add(name)?;
            if session.json {
                return output::json(&id);
            }
            output::success(&format!("Added project {id}"));
            Ok(())
        }
        ProjectsCommands::Done { id, done } => {
            service.set_done(id, done)?;
            if session.json {
                return output::json(&serde_json::json!({ "id": id, "done": done }));
            }
            output::success(&format!("Project {id} done={done}"));
            Ok(())
        }
        ProjectsCommands::Completed { start, end } => {
            let count = service.get_completed_in_time_range(start, end)?;
            if session.json {
                return output::json(&count);
            }
            println!("{count}");
            Ok(())
        }
    }
}
