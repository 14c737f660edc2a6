//! CLI command implementations

pub mod entries;
pub mod history;
pub mod project_tasks;
pub mod projects;
pub mod stats;
pub mod tasks;

use std::path::PathBuf;

use anyhow::{Context, Result};
use daylog_core::{init_logging, DayKey, DaylogConfig, DaylogContext};
use log::info;

use crate::output;

/// Open database plus output mode.
pub struct Session {
    pub ctx: DaylogContext,
    pub json: bool,
}

impl Session {
    /// Resolves the data directory, loads settings, starts logging and opens
    /// the database.
    pub fn open(dir: Option<PathBuf>, json: bool) -> Result<Self> {
        let data_dir = match dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let config = DaylogConfig::load(&data_dir)?;

        // Logging never blocks a command.
        match std::fs::create_dir_all(&config.log_dir) {
            Ok(()) => {
                if let Err(err) = init_logging(config.log_level, &config.log_dir) {
                    output::warning(&format!("logging disabled: {err}"));
                }
            }
            Err(err) => output::warning(&format!(
                "logging disabled: cannot create {}: {err}",
                config.log_dir.display()
            )),
        }

        let ctx = DaylogContext::open(&config)
            .with_context(|| format!("Failed to open database: {}", config.db_path.display()))?;
        info!(
            "event=cli_start module=cli status=ok version={} day_start_hour={}",
            env!("CARGO_PKG_VERSION"),
            config.day_start_hour
        );

        Ok(Self { ctx, json })
    }
}

/// `<platform data dir>/daylog`
fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join("daylog"))
        .context("Could not find a data directory; pass --dir or set DAYLOG_DIR")
}

/// The given day, or today in local time.
pub fn day_or_today(day: Option<DayKey>) -> DayKey {
    day.unwrap_or_else(DayKey::today)
}
