//! Daylog CLI - hourly signal/noise log, day tasks and project checklists

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{entries, history, project_tasks, projects, stats, tasks, Session};
use daylog_core::HistoryRange;

/// Daylog - log every hour as signal, noise or sleep
#[derive(Parser)]
#[command(name = "daylog", version, about, long_about = None)]
struct Cli {
    /// Data directory holding the database, settings and logs
    #[arg(long, global = true, env = "DAYLOG_DIR")]
    dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read and write hourly entries
    Entries {
        #[command(subcommand)]
        command: entries::EntriesCommands,
    },

    /// Day task list with carry-over
    Tasks {
        #[command(subcommand)]
        command: tasks::TasksCommands,
    },

    /// Legacy single project of a day
    Project {
        #[command(subcommand)]
        command: projects::ProjectCommands,
    },

    /// Projects and their completion state
    Projects {
        #[command(subcommand)]
        command: projects::ProjectsCommands,
    },

    /// Checklist items of a project
    ProjectTasks {
        #[command(subcommand)]
        command: project_tasks::ProjectTasksCommands,
    },

    /// Signal/noise/sleep hours over a recent range
    History {
        /// Range to load (week, month, year)
        #[arg(long, default_value = "week")]
        range: HistoryRange,
    },

    /// Completed project tasks and projects per week, month, quarter and year
    Stats,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let session = Session::open(cli.dir, cli.json)?;
    match cli.command {
        Commands::Entries { command } => entries::run(&session, command),
        Commands::Tasks { command } => tasks::run(&session, command),
        Commands::Project { command } => projects::run_day_project(&session, command),
        Commands::Projects { command } => projects::run(&session, command),
        Commands::ProjectTasks { command } => project_tasks::run(&session, command),
        Commands::History { range } => history::run(&session, range),
        Commands::Stats => stats::run(&session),
    }
}
