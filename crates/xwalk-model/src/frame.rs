//! Row-aligned tabular data over nested JSON values.
//!
//! A [`Frame`] is an ordered set of named [`Column`]s that all share the
//! same row count. Cells are [`serde_json::Value`]s, so a cell can hold a
//! scalar, a nested record, or a list of records. `Value::Null` marks a
//! cell with no value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ModelError, Result};

/// A named, row-aligned column of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// A column of `len` null cells.
    pub fn nulls(name: impl Into<String>, len: usize) -> Self {
        Self::new(name, vec![Value::Null; len])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Returns the column under a new name.
    #[must_use]
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of null cells.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_null()).count()
    }
}

/// Ordered named columns sharing a row count.
///
/// The height is stored explicitly so a frame without columns still knows
/// how many rows it describes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawFrame")]
pub struct Frame {
    columns: Vec<Column>,
    height: usize,
}

/// Unchecked wire form of a [`Frame`].
#[derive(Deserialize)]
struct RawFrame {
    columns: Vec<Column>,
    height: usize,
}

impl TryFrom<RawFrame> for Frame {
    type Error = ModelError;

    fn try_from(raw: RawFrame) -> Result<Self> {
        let mut frame = Self::new(raw.height);
        for column in raw.columns {
            frame.push_column(column)?;
        }
        Ok(frame)
    }
}

impl Frame {
    /// Creates a frame with `height` rows and no columns.
    pub fn new(height: usize) -> Self {
        Self {
            columns: Vec::new(),
            height,
        }
    }

    /// Creates a frame from columns of equal length.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ColumnLength`] if the columns differ in length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let height = columns.first().map_or(0, Column::len);
        let mut frame = Self::new(height);
        for column in columns {
            frame.push_column(column)?;
        }
        Ok(frame)
    }

    /// Creates a frame from a list of records, one row per record.
    ///
    /// Columns are the union of record keys in first-seen order; a record
    /// lacking a key gets a null cell. Non-object records become rows with
    /// every cell null.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let records: Vec<&Value> = records.into_iter().collect();
        let mut names: Vec<&str> = Vec::new();
        for record in &records {
            if let Value::Object(map) = record {
                for key in map.keys() {
                    if !names.contains(&key.as_str()) {
                        names.push(key);
                    }
                }
            }
        }

        let columns = names
            .iter()
            .map(|name| {
                let values = records
                    .iter()
                    .map(|record| record.get(*name).cloned().unwrap_or(Value::Null))
                    .collect();
                Column::new(*name, values)
            })
            .collect();

        Self {
            columns,
            height: records.len(),
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// True when the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// Looks up a column by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    /// Appends a column.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ColumnLength`] if the column length differs
    /// from the frame height.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if column.len() != self.height {
            return Err(ModelError::ColumnLength {
                column: column.name,
                len: column.values.len(),
                height: self.height,
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Returns row `idx` as a record keyed by column name.
    pub fn row(&self, idx: usize) -> Option<Map<String, Value>> {
        if idx >= self.height {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|column| {
                    let value = column.values.get(idx).cloned().unwrap_or(Value::Null);
                    (column.name.clone(), value)
                })
                .collect(),
        )
    }

    /// Returns every row as a JSON object.
    pub fn to_records(&self) -> Vec<Value> {
        (0..self.height)
            .filter_map(|idx| self.row(idx).map(Value::Object))
            .collect()
    }

    /// Keeps only the rows whose flag in `keep` is true.
    ///
    /// Rows past the end of `keep` are kept.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        let kept = |idx: usize| keep.get(idx).copied().unwrap_or(true);
        for column in &mut self.columns {
            let mut idx = 0;
            column.values.retain(|_| {
                let retain = kept(idx);
                idx += 1;
                retain
            });
        }
        self.height = (0..self.height).filter(|idx| kept(*idx)).count();
    }

    /// Applies `f` to every cell.
    pub fn map_cells<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Value),
    {
        for column in &mut self.columns {
            column.values.iter_mut().for_each(&mut f);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_records_unions_keys_in_order() {
        let records = [json!({"id": 1, "title": "a"}), json!({"id": 2, "size": 10})];
        let frame = Frame::from_records(&records);

        assert_eq!(frame.height(), 2);
        assert_eq!(frame.column_names(), vec!["id", "title", "size"]);
        assert_eq!(frame.column("title").unwrap().values, vec![json!("a"), Value::Null]);
        assert_eq!(frame.column("size").unwrap().values, vec![Value::Null, json!(10)]);
    }

    #[test]
    fn test_from_columns_rejects_ragged() {
        let err = Frame::from_columns(vec![
            Column::new("a", vec![json!(1), json!(2)]),
            Column::new("b", vec![json!(1)]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::ColumnLength {
                column: "b".to_string(),
                len: 1,
                height: 2
            }
        );
    }

    #[test]
    fn test_empty_frame_keeps_height() {
        let frame = Frame::new(3);
        assert_eq!(frame.height(), 3);
        assert_eq!(frame.width(), 0);
        assert_eq!(frame.to_records(), vec![json!({}), json!({}), json!({})]);
    }

    #[test]
    fn test_retain_rows() {
        let mut frame = Frame::from_columns(vec![
            Column::new("a", vec![json!(1), json!(2), json!(3)]),
            Column::new("b", vec![json!("x"), json!("y"), json!("z")]),
        ])
        .unwrap();
        frame.retain_rows(&[true, false, true]);

        assert_eq!(frame.height(), 2);
        assert_eq!(frame.column("a").unwrap().values, vec![json!(1), json!(3)]);
        assert_eq!(frame.column("b").unwrap().values, vec![json!("x"), json!("z")]);
    }

    #[test]
    fn test_row_as_record() {
        let records = [json!({"x": 1, "y": 2})];
        let frame = Frame::from_records(&records);
        assert_eq!(Value::Object(frame.row(0).unwrap()), json!({"x": 1, "y": 2}));
        assert!(frame.row(1).is_none());
    }

    #[test]
    fn test_deserialize_rejects_ragged_columns() {
        let value = json!({
            "columns": [{"name": "stats", "values": [{"views": 1}]}],
            "height": 3
        });
        let err = serde_json::from_value::<Frame>(value).unwrap_err();
        assert!(err.to_string().contains("column 'stats' has 1 rows, expected 3"));
    }

    #[test]
    fn test_deserialize_keeps_height() {
        let value = json!({
            "columns": [{"name": "id", "values": [1, 2]}],
            "height": 2
        });
        let frame: Frame = serde_json::from_value(value).unwrap();
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.to_records(), vec![json!({"id": 1}), json!({"id": 2})]);

        let empty: Frame = serde_json::from_value(json!({"columns": [], "height": 3})).unwrap();
        assert_eq!(empty.height(), 3);
    }

    #[test]
    fn test_column_helpers() {
        let column = Column::nulls("empty", 2);
        assert_eq!(column.null_count(), 2);
        assert_eq!(column.renamed("other").name, "other");
    }
}
