//! Error types for the report pipeline and its collaborators.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the data source itself.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Snapshot file could not be read
    #[error("failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Snapshot file is not valid JSON of the expected shape
    #[error("failed to parse snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// No data source was configured for the run
    #[error("no data source configured (pass --source or set \"source\" in the config file)")]
    NotConfigured,
}

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Anything that aborts a report run.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("data source query failed: {0}")]
    DataSource(#[from] SourceError),

    /// A record came back in a shape the report cannot use
    #[error("malformed {entity_type} record {id}: {source}")]
    Decode {
        entity_type: String,
        id: String,
        source: serde_json::Error,
    },

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write report {path}: {source}")]
    WriteReport {
        path: PathBuf,
        source: std::io::Error,
    },
}
