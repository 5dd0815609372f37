//! Errors raised at the I/O boundary (loading scenarios and history).
//!
//! The projection engine itself is total and never returns these.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported file format for {0} (expected .json or .csv)")]
    UnsupportedFormat(PathBuf),

    #[error("row {row}: unknown filing status {value:?}")]
    UnknownFilingStatus { row: usize, value: String },

    #[error("row {row}: invalid timestamp {value:?}")]
    InvalidTimestamp { row: usize, value: String },

    #[error("row {row}: amount is not a finite number")]
    NonFiniteAmount { row: usize },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io { path: path.into(), source }
    }
}
