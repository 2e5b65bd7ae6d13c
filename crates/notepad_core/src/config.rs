//! Runtime configuration for opening a notepad workspace.
//!
//! # Invariants
//! - After `resolve_against`, `data_dir` and `log_dir` are absolute.
//! - `log_level` is always a canonical level name.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use crate::repo::collection_repo::DEFAULT_STORAGE_KEY;
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_FILE_NAME: &str = "notepad.sqlite3";
const DEFAULT_DATA_DIR_NAME: &str = ".notepad";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the database file.
    pub data_dir: PathBuf,
    pub db_file_name: String,
    /// Key the note collection is stored under.
    pub storage_key: String,
    pub log_level: &'static str,
    pub log_dir: PathBuf,
    pub logging_enabled: bool,
}

impl AppConfig {
    /// Defaults rooted at `data_dir`; logs go to `<data_dir>/logs`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            log_dir: data_dir.join(LOG_DIR_NAME),
            data_dir,
            db_file_name: DEFAULT_DB_FILE_NAME.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: default_log_level(),
            logging_enabled: true,
        }
    }

    pub fn with_log_level(mut self, level: &str) -> Result<Self, LoggingError> {
        self.log_level = normalize_level(level)?;
        Ok(self)
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    /// Makes relative directories absolute by joining them onto `base`.
    pub fn resolve_against(mut self, base: &Path) -> Self {
        if self.data_dir.is_relative() {
            self.data_dir = base.join(&self.data_dir);
        }
        if self.log_dir.is_relative() {
            self.log_dir = base.join(&self.log_dir);
        }
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file_name)
    }
}

/// `$HOME/.notepad`, or `.notepad` in the working directory when `HOME` is
/// unset.
pub fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(DEFAULT_DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DEFAULT_DB_FILE_NAME};
    use std::path::Path;

    #[test]
    fn defaults_derive_from_data_dir() {
        let config = AppConfig::new("/tmp/notes");
        assert_eq!(config.log_dir, Path::new("/tmp/notes/logs"));
        assert_eq!(config.db_path(), Path::new("/tmp/notes").join(DEFAULT_DB_FILE_NAME));
        assert_eq!(config.storage_key, "notes");
        assert!(config.logging_enabled);
    }

    #[test]
    fn relative_dirs_resolve_against_base() {
        let config = AppConfig::new("data").resolve_against(Path::new("/work"));
        assert_eq!(config.data_dir, Path::new("/work/data"));
        assert_eq!(config.log_dir, Path::new("/work/data/logs"));
    }

    #[test]
    fn log_level_is_normalized() {
        let config = AppConfig::new("/tmp/notes").with_log_level("WARNING").unwrap();
        assert_eq!(config.log_level, "warn");
        assert!(AppConfig::new("/tmp/notes").with_log_level("chatty").is_err());
    }
}
