//! Error types for record ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading record files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Record file not found.
    #[error("record file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is {size} bytes, larger than the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File extension is not a supported record format.
    #[error("unsupported record format '{extension}' for {path} (expected .json, .jsonl, .ndjson, or .csv)")]
    UnsupportedFormat { path: PathBuf, extension: String },

    // === JSON Errors ===
    /// Failed to parse JSON.
    #[error("failed to parse JSON {path} at line {line}: {source}")]
    JsonParse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A record is not a JSON object.
    #[error("record {index} in {path} is not a JSON object")]
    NotARecord { path: PathBuf, index: usize },

    /// The document holds no recognizable list of records.
    #[error("unexpected JSON layout in {path}: {reason}")]
    UnexpectedLayout { path: PathBuf, reason: String },

    // === CSV Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Maps an I/O error on `path` to `FileNotFound` or `FileRead`.
pub(crate) fn io_error(path: &std::path::Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}
