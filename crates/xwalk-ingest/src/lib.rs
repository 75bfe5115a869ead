//! Loading repository record files into frames.
//!
//! Records arrive as JSON exported from repository APIs (a plain array,
//! or an object wrapping one), as JSON Lines, or as flat CSV. Each loader
//! produces a [`Frame`] with one row per record, ready to be resolved
//! against a crosswalk.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use xwalk_ingest::load_records;
//!
//! let frame = load_records(Path::new("zenodo_records.json"))?;
//! println!("{} records, {} columns", frame.height(), frame.width());
//! ```

mod csv;
mod error;
mod json;

use std::path::Path;

use xwalk_model::Frame;

pub use crate::csv::read_csv_frame;
pub use error::{IngestError, Result};
pub use json::{RECORD_LIST_KEYS, parse_json_lines, parse_json_records};

use error::io_error;

/// Maximum size of a record file (500 MB).
pub const MAX_RECORD_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Supported record file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Json,
    JsonLines,
    Csv,
}

impl RecordFormat {
    /// Picks the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Ok(Self::Json),
            "jsonl" | "ndjson" => Ok(Self::JsonLines),
            "csv" => Ok(Self::Csv),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Check file size against a limit.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Loads a record file, choosing the format from its extension.
pub fn load_records(path: &Path) -> Result<Frame> {
    load_records_as(path, RecordFormat::from_path(path)?)
}

/// Loads a record file in an explicit format.
pub fn load_records_as(path: &Path, format: RecordFormat) -> Result<Frame> {
    check_file_size(path, MAX_RECORD_FILE_SIZE)?;

    let frame = match format {
        RecordFormat::Csv => read_csv_frame(path)?,
        RecordFormat::Json | RecordFormat::JsonLines => {
            let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
            let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
            let records = match format {
                RecordFormat::JsonLines => parse_json_lines(text, path)?,
                _ => parse_json_records(text, path)?,
            };
            Frame::from_records(&records)
        }
    };

    tracing::info!(
        path = %path.display(),
        format = ?format,
        rows = frame.height(),
        columns = frame.width(),
        "Loaded records"
    );
    Ok(frame)
}
