//! Tracker configuration loading
//!
//! Settings come from three layers, later layers winning: built-in
//! defaults, an optional TOML file, then `TASKTRACK_*` environment
//! variables. The CLI applies its own flags on top.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TaskError, TaskResult};

pub const ENV_DATA_DIR: &str = "TASKTRACK_DATA_DIR";
pub const ENV_LOG_FORMAT: &str = "TASKTRACK_LOG_FORMAT";
pub const ENV_ATOMIC_WRITES: &str = "TASKTRACK_ATOMIC_WRITES";

/// Console log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(TaskError::Config {
                message: format!("unknown log format '{}', expected pretty or json", other),
            }),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Locations of the backing files and runtime switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Directory holding all four files.
    pub data_dir: PathBuf,
    pub user_file: String,
    pub task_file: String,
    pub task_overview_file: String,
    pub user_overview_file: String,
    /// Write through a temporary file and rename instead of truncating
    /// the target in place.
    pub atomic_writes: bool,
    pub log_format: LogFormat,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            user_file: "user.txt".to_string(),
            task_file: "tasks.txt".to_string(),
            task_overview_file: "task_overview.txt".to_string(),
            user_overview_file: "user_overview.txt".to_string(),
            atomic_writes: false,
            log_format: LogFormat::Pretty,
        }
    }
}

impl TrackerConfig {
    /// Defaults rooted at `data_dir`.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TaskResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TaskError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        tracing::debug!(path = ?path, "Loaded tracker config file");
        Self::load_from_toml(&content)
    }

    /// Load configuration from a TOML string
    pub fn load_from_toml(toml_content: &str) -> TaskResult<Self> {
        toml::from_str(toml_content).map_err(|e| TaskError::Config {
            message: format!("Failed to parse TOML config: {}", e),
        })
    }

    /// Apply `TASKTRACK_*` variables from the process environment.
    pub fn apply_env_overrides(&mut self) -> TaskResult<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> TaskResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR)
            && !dir.is_empty()
        {
            self.data_dir = PathBuf::from(dir);
        }

        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            self.log_format = format.parse()?;
        }

        if let Some(flag) = lookup(ENV_ATOMIC_WRITES) {
            self.atomic_writes = parse_bool(ENV_ATOMIC_WRITES, &flag)?;
        }

        Ok(())
    }

    pub fn user_path(&self) -> PathBuf {
        self.data_dir.join(&self.user_file)
    }

    pub fn task_path(&self) -> PathBuf {
        self.data_dir.join(&self.task_file)
    }

    pub fn task_overview_path(&self) -> PathBuf {
        self.data_dir.join(&self.task_overview_file)
    }

    pub fn user_overview_path(&self) -> PathBuf {
        self.data_dir.join(&self.user_overview_file)
    }
}

fn parse_bool(key: &str, value: &str) -> TaskResult<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(TaskError::Config {
            message: format!("{} must be a boolean, found '{}'", key, other),
        }),
    }
}
