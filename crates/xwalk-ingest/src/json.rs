//! JSON and JSON Lines record files.

use std::path::Path;

use serde_json::Value;

use crate::error::{IngestError, Result};

/// Keys under which repository APIs commonly wrap their record lists.
pub const RECORD_LIST_KEYS: [&str; 3] = ["records", "hits", "data"];

/// Parses a JSON document into a list of records.
///
/// Accepts a top-level array of objects, an object wrapping such an array
/// under one of [`RECORD_LIST_KEYS`], or a single object.
pub fn parse_json_records(text: &str, path: &Path) -> Result<Vec<Value>> {
    let document: Value = serde_json::from_str(text).map_err(|source| IngestError::JsonParse {
        path: path.to_path_buf(),
        line: source.line(),
        source,
    })?;

    let records = match document {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let wrapped = RECORD_LIST_KEYS
                .into_iter()
                .find(|key| map.get(*key).is_some_and(Value::is_array));
            match wrapped.and_then(|key| map.remove(key)) {
                Some(Value::Array(items)) => {
                    tracing::debug!(path = %path.display(), "Unwrapped record list");
                    items
                }
                _ => vec![Value::Object(map)],
            }
        }
        _ => {
            return Err(IngestError::UnexpectedLayout {
                path: path.to_path_buf(),
                reason: "top level must be an array or an object".to_string(),
            });
        }
    };

    ensure_objects(&records, path)?;
    Ok(records)
}

/// Parses JSON Lines text: one record per line, blank lines skipped.
pub fn parse_json_lines(text: &str, path: &Path) -> Result<Vec<Value>> {
    let mut records = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record: Value = serde_json::from_str(line).map_err(|source| IngestError::JsonParse {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        if !record.is_object() {
            return Err(IngestError::NotARecord {
                path: path.to_path_buf(),
                index: records.len(),
            });
        }
        records.push(record);
    }
    Ok(records)
}

fn ensure_objects(records: &[Value], path: &Path) -> Result<()> {
    match records.iter().position(|record| !record.is_object()) {
        Some(index) => Err(IngestError::NotARecord {
            path: path.to_path_buf(),
            index,
        }),
        None => Ok(()),
    }
}
