//! Runtime configuration.
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! { "dayStartHour": 10, "logLevel": "info", "logDir": "logs", "dbFile": "daylog.sqlite3" }
//! ```
//! Every field is optional. `DAYLOG_LOG_LEVEL` and `DAYLOG_DAY_START_HOUR`
//! override the file.

use crate::logging::{default_log_level, normalize_level};
use crate::model::time_block::DEFAULT_DAY_START_HOUR;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const DEFAULT_DB_FILE_NAME: &str = "daylog.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "logs";

const ENV_LOG_LEVEL: &str = "DAYLOG_LOG_LEVEL";
const ENV_DAY_START_HOUR: &str = "DAYLOG_DAY_START_HOUR";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read settings `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid settings file `{}`: {source}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

/// Raw `settings.json` shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsFile {
    #[serde(default)]
    pub day_start_hour: Option<u8>,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default)]
    pub db_file: Option<String>,
}

/// Resolved configuration with absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaylogConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: &'static str,
    pub day_start_hour: u8,
}

impl DaylogConfig {
    /// Loads settings from `data_dir` and applies environment overrides.
    ///
    /// A missing settings file means all defaults.
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let settings_path = data_dir.join(SETTINGS_FILE_NAME);
        let settings = if settings_path.exists() {
            let content =
                std::fs::read_to_string(&settings_path).map_err(|source| ConfigError::Io {
                    path: settings_path.clone(),
                    source,
                })?;
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: settings_path.clone(),
                source,
            })?
        } else {
            SettingsFile::default()
        };

        Self::resolve(data_dir, settings, |key| std::env::var(key).ok())
    }

    /// Resolves settings against `data_dir` with an explicit environment.
    pub fn resolve(
        data_dir: &Path,
        settings: SettingsFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let data_dir = absolutize(data_dir)?;

        let level_input = env(ENV_LOG_LEVEL).or(settings.log_level);
        let log_level = match level_input {
            Some(level) => normalize_level(&level).map_err(ConfigError::Invalid)?,
            None => default_log_level(),
        };

        let day_start_hour = match env(ENV_DAY_START_HOUR) {
            Some(raw) => raw.trim().parse::<u8>().map_err(|_| {
                ConfigError::Invalid(format!("{ENV_DAY_START_HOUR} `{raw}` is not an hour"))
            })?,
            None => settings.day_start_hour.unwrap_or(DEFAULT_DAY_START_HOUR),
        };
        if day_start_hour > 23 {
            return Err(ConfigError::Invalid(format!(
                "day start hour {day_start_hour} is outside 0..=23"
            )));
        }

        let log_dir = data_dir.join(
            settings
                .log_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR_NAME)),
        );
        let db_file = settings
            .db_file
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_FILE_NAME.to_string());

        Ok(Self {
            db_path: data_dir.join(db_file),
            log_dir,
            log_level,
            day_start_hour,
            data_dir,
        })
    }
}

fn absolutize(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DaylogConfig, SettingsFile, DEFAULT_DB_FILE_NAME};
    use std::path::Path;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_apply_when_settings_are_empty() {
        let config =
            DaylogConfig::resolve(Path::new("/tmp/daylog"), SettingsFile::default(), no_env)
                .unwrap();
        assert_eq!(config.day_start_hour, 10);
        assert_eq!(config.db_path, Path::new("/tmp/daylog").join(DEFAULT_DB_FILE_NAME));
        assert_eq!(config.log_dir, Path::new("/tmp/daylog/logs"));
    }

    #[test]
    fn environment_overrides_settings() {
        let settings = SettingsFile {
            day_start_hour: Some(6),
            log_level: Some("debug".to_string()),
            ..SettingsFile::default()
        };
        let config = DaylogConfig::resolve(Path::new("/tmp/daylog"), settings, |key| match key {
            "DAYLOG_LOG_LEVEL" => Some("WARNING".to_string()),
            "DAYLOG_DAY_START_HOUR" => Some("7".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.day_start_hour, 7);
    }

    #[test]
    fn out_of_range_start_hour_is_rejected() {
        let settings = SettingsFile {
            day_start_hour: Some(24),
            ..SettingsFile::default()
        };
        let err = DaylogConfig::resolve(Path::new("/tmp/daylog"), settings, no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
