//! The value produced by resolving an attribute path.

use serde::{Serialize, Serializer};
use serde_json::Value;
use xwalk_model::{AttributePath, Column, Frame};

/// Result of a resolution: a scalar, a column, a composite table, or
/// nothing at all.
///
/// Columns and tables are row-aligned with the context they came from
/// unless the drop pass removed empty rows.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Missing,
    Scalar(Value),
    Column(Column),
    Table(Frame),
}

impl Resolved {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_column(&self) -> Option<&Column> {
        match self {
            Self::Column(column) => Some(column),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Frame> {
        match self {
            Self::Table(frame) => Some(frame),
            _ => None,
        }
    }

    pub fn into_column(self) -> Option<Column> {
        match self {
            Self::Column(column) => Some(column),
            _ => None,
        }
    }

    pub fn into_table(self) -> Option<Frame> {
        match self {
            Self::Table(frame) => Some(frame),
            _ => None,
        }
    }

    /// Number of rows described by the result.
    pub fn row_count(&self) -> usize {
        match self {
            Self::Missing => 0,
            Self::Scalar(_) => 1,
            Self::Column(column) => column.len(),
            Self::Table(frame) => frame.height(),
        }
    }

    /// Every cell of the result, row-major for tables.
    pub fn cells(&self) -> Vec<&Value> {
        match self {
            Self::Missing => Vec::new(),
            Self::Scalar(value) => vec![value],
            Self::Column(column) => column.iter().collect(),
            Self::Table(frame) => (0..frame.height())
                .flat_map(|idx| frame.columns().iter().filter_map(move |c| c.get(idx)))
                .collect(),
        }
    }

    /// JSON rendering: columns become arrays, tables arrays of row objects.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Missing => Value::Null,
            Self::Scalar(value) => value.clone(),
            Self::Column(column) => Value::Array(column.values.clone()),
            Self::Table(frame) => Value::Array(frame.to_records()),
        }
    }

    /// Collapses single-column tables into columns and empty tables into
    /// `Missing`.
    ///
    /// A collapsed column takes the path's string form as its name when
    /// the path has one.
    pub(crate) fn degenerate(self, path: &AttributePath) -> Self {
        let Self::Table(frame) = self else {
            return self;
        };
        match frame.width() {
            0 => Self::Missing,
            1 => {
                let mut columns = frame.into_columns();
                let column = columns.remove(0);
                match path.string_form() {
                    Some(name) => Self::Column(column.renamed(name)),
                    None => Self::Column(column),
                }
            }
            _ => Self::Table(frame),
        }
    }

    /// Flattens a result computed against a single record into one cell.
    pub(crate) fn into_cell(self) -> Value {
        match self {
            Self::Missing => Value::Null,
            Self::Scalar(value) => value,
            Self::Column(mut column) => match column.len() {
                0 => Value::Null,
                1 => column.values.swap_remove(0),
                _ => Value::Array(column.values),
            },
            Self::Table(frame) => match (frame.height(), frame.width()) {
                (_, 0) | (0, _) => Value::Null,
                (1, _) => frame.row(0).map_or(Value::Null, Value::Object),
                _ => Value::Array(frame.to_records()),
            },
        }
    }
}

impl Serialize for Resolved {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<Value> for Resolved {
    fn from(value: Value) -> Self {
        Self::Scalar(value)
    }
}

impl From<Resolved> for Value {
    fn from(resolved: Resolved) -> Self {
        match resolved {
            Resolved::Missing => Value::Null,
            Resolved::Scalar(value) => value,
            Resolved::Column(column) => Value::Array(column.values),
            Resolved::Table(frame) => Value::Array(frame.to_records()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn table() -> Frame {
        Frame::from_columns(vec![
            Column::new("views", vec![json!(1), json!(2)]),
            Column::new("unique_views", vec![json!(1), Value::Null]),
        ])
        .unwrap()
    }

    #[test]
    fn test_degenerate_single_column() {
        let frame = Frame::from_columns(vec![Column::new("size", vec![json!(1)])]).unwrap();
        let path = AttributePath::nested("files", "size");
        let resolved = Resolved::Table(frame).degenerate(&path);
        assert_eq!(resolved.as_column().unwrap().name, "files:size");
    }

    #[test]
    fn test_degenerate_keeps_wide_tables() {
        let path = AttributePath::nested("stats", AttributePath::sequence(["views", "unique_views"]));
        let resolved = Resolved::Table(table()).degenerate(&path);
        assert_eq!(resolved.as_table().unwrap().width(), 2);
        assert!(Resolved::Table(Frame::new(2)).degenerate(&path).is_missing());
    }

    #[test]
    fn test_to_json() {
        assert_eq!(Resolved::Missing.to_json(), Value::Null);
        assert_eq!(
            Resolved::Table(table()).to_json(),
            json!([{"views": 1, "unique_views": 1}, {"views": 2, "unique_views": null}])
        );
        assert_eq!(Value::from(Resolved::Table(table())), Resolved::Table(table()).to_json());
    }

    #[test]
    fn test_cells_row_major() {
        let resolved = Resolved::Table(table());
        assert_eq!(
            resolved.cells(),
            vec![&json!(1), &json!(1), &json!(2), &Value::Null]
        );
        assert_eq!(resolved.row_count(), 2);
    }

    #[test]
    fn test_into_cell() {
        assert_eq!(Resolved::Missing.into_cell(), Value::Null);
        assert_eq!(
            Resolved::Column(Column::new("a", vec![json!(5)])).into_cell(),
            json!(5)
        );
        let frame = Frame::from_columns(vec![
            Column::new("x", vec![json!(1)]),
            Column::new("y", vec![json!(2)]),
        ])
        .unwrap();
        assert_eq!(Resolved::Table(frame).into_cell(), json!({"x": 1, "y": 2}));
    }
}
