//! Error types for loading and analyzing harness results

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or aggregating benchmark results
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Nothing to analyze. Callers report this and exit cleanly.
    #[error("No result data found at {0}")]
    NoData(PathBuf),

    #[error("Malformed result document {path}: {reason}")]
    MalformedDocument { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HarnessError {
    /// Build a `MalformedDocument` error for `path`
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error only means "nothing to analyze"
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData(_))
    }
}

/// Result type for harness operations
pub type Result<T> = std::result::Result<T, HarnessError>;
