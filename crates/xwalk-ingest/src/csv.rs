//! CSV record files, read through polars.

use std::path::Path;

use polars::prelude::*;
use xwalk_common::dataframe_to_frame;
use xwalk_model::Frame;

use crate::error::{IngestError, Result};

/// Reads a CSV file with a single header row into a [`Frame`].
///
/// Column types are inferred from the first 100 rows.
pub fn read_csv_frame(path: &Path) -> Result<Frame> {
    let csv_error = |e: PolarsError| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(csv_error)?
        .finish()
        .map_err(csv_error)?;

    if df.width() > 500 {
        tracing::warn!(
            path = %path.display(),
            columns = df.width(),
            "Dataset has more than 500 columns - may impact performance"
        );
    }

    Ok(dataframe_to_frame(&df)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::{Value, json};
    use tempfile::NamedTempFile;

    use super::*;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_frame() {
        let file = create_temp_csv("did,name,num_downloads\n1,iris,120\n2,wine,\n");
        let frame = read_csv_frame(file.path()).unwrap();

        assert_eq!(frame.height(), 2);
        assert_eq!(frame.column_names(), vec!["did", "name", "num_downloads"]);
        assert_eq!(frame.column("name").unwrap().values, vec![json!("iris"), json!("wine")]);
        assert_eq!(
            frame.column("num_downloads").unwrap().values,
            vec![json!(120), Value::Null]
        );
    }
}
