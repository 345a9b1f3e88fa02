//! Application configuration
//!
//! Resolves where the database and the log files live. Defaults come from the
//! platform data directory; `TODO_LIST_DB` and `TODO_LIST_LOG_DIR` override
//! them, and a JSON file can provide both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

pub const DB_ENV: &str = "TODO_LIST_DB";
pub const LOG_DIR_ENV: &str = "TODO_LIST_LOG_DIR";

/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "todo_list.db";
const LOG_DIR_NAME: &str = "logs";

/// Name used for the log files
pub const APP_NAME: &str = "TodoList";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Platform defaults with environment overrides applied
    pub fn load() -> Result<Self> {
        let mut config = Self::defaults()?;
        config.apply_overrides(|key| std::env::var_os(key).map(PathBuf::from));
        Ok(config)
    }

    /// Paths under the platform data directory
    pub fn defaults() -> Result<Self> {
        let dirs = ProjectDirs::from("org", "example", "todo-list")
            .ok_or_else(|| anyhow!("could not locate a data directory"))?;
        Ok(Self::rooted_at(dirs.data_dir()))
    }

    /// Database and logs side by side under `root`
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            db_path: root.join(DB_FILE_NAME),
            log_dir: root.join(LOG_DIR_NAME),
        }
    }

    /// Read a JSON config file with `db_path` and `log_dir`
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<PathBuf>) {
        if let Some(db_path) = lookup(DB_ENV) {
            self.db_path = db_path;
        }
        if let Some(log_dir) = lookup(LOG_DIR_ENV) {
            self.log_dir = log_dir;
        }
    }
}
