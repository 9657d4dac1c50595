//! User configuration for report runs.
//!
//! Read from `~/.sg_report/config.json` (or `--config <path>`). Every key is
//! optional; a missing file means defaults all round.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::fields::IN_PROGRESS;

pub const DEFAULT_LOG_FILE: &str = "sg_report.log";

/// Directory holding the config file and, by default, the logs.
pub fn app_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".sg_report")
}

pub fn default_config_path() -> PathBuf {
    app_dir().join("config.json")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Snapshot file answering the report queries.
    pub source: Option<PathBuf>,
    /// Status code treated as "in progress".
    pub in_progress_status: String,
    pub log_dir: PathBuf,
    pub log_file: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            source: None,
            in_progress_status: IN_PROGRESS.to_string(),
            log_dir: app_dir().join("logs"),
            log_file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl ReportConfig {
    /// Load configuration from `path`, falling back to defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.in_progress_status, "ip");
        assert_eq!(config.log_file, "sg_report.log");
        assert!(config.source.is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"source": "/data/snapshot.json", "in_progress_status": "act"}"#).unwrap();

        let config = ReportConfig::load_from(&path).unwrap();
        assert_eq!(config.source, Some(PathBuf::from("/data/snapshot.json")));
        assert_eq!(config.in_progress_status, "act");
        assert_eq!(config.log_file, DEFAULT_LOG_FILE);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(ReportConfig::load_from(&path), Err(ConfigError::Parse { .. })));
    }
}
