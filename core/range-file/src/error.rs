//! FILENAME: core/range-file/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RangeFileError {
    #[error("Cannot read range file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Range file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid range: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Range schema failed to compile: {0}")]
    Schema(String),
}

impl RangeFileError {
    /// Short tag used as a log field so the three user-facing failures stay
    /// distinguishable in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            RangeFileError::Read { .. } => "read",
            RangeFileError::Parse(_) => "parse",
            RangeFileError::Validation(_) => "validation",
            RangeFileError::Schema(_) => "schema",
        }
    }
}
