//! Error types for workbook analysis.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while persisting or loading the analysis summary.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Summary file not found.
    #[error("analysis summary not found: {path} (run `wbs extract` first)")]
    SummaryNotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Summary JSON is malformed or does not match the model.
    #[error("invalid analysis JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, CoreError>;
