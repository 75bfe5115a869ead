//! Post-resolution passes: missing-value normalization and row dropping.

use serde_json::Value;

use crate::resolved::Resolved;

/// True for values that carry no data: null, the empty string, and empty
/// lists or records.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Replaces every null inside the result with `sentinel`.
///
/// Nulls nested in lists and records are replaced too; populated values
/// are left untouched. A missing result becomes the sentinel scalar.
pub fn fill_missing(resolved: Resolved, sentinel: &Value) -> Resolved {
    match resolved {
        Resolved::Missing => Resolved::Scalar(sentinel.clone()),
        Resolved::Scalar(mut value) => {
            fill_value(&mut value, sentinel);
            Resolved::Scalar(value)
        }
        Resolved::Column(mut column) => {
            column
                .values
                .iter_mut()
                .for_each(|value| fill_value(value, sentinel));
            Resolved::Column(column)
        }
        Resolved::Table(mut frame) => {
            frame.map_cells(|value| fill_value(value, sentinel));
            Resolved::Table(frame)
        }
    }
}

fn fill_value(value: &mut Value, sentinel: &Value) {
    match value {
        Value::Null => *value = sentinel.clone(),
        Value::Array(items) => items.iter_mut().for_each(|item| fill_value(item, sentinel)),
        Value::Object(map) => map.values_mut().for_each(|item| fill_value(item, sentinel)),
        _ => {}
    }
}

/// Removes empty entries from a column and all-null rows from a table.
///
/// The result is no longer aligned with the context's rows.
pub fn drop_empty(resolved: Resolved) -> Resolved {
    match resolved {
        Resolved::Column(mut column) => {
            let before = column.len();
            column.values.retain(|value| !value.is_null());
            tracing::trace!(
                column = %column.name,
                dropped = before - column.len(),
                "Dropped empty entries"
            );
            Resolved::Column(column)
        }
        Resolved::Table(mut frame) => {
            let keep: Vec<bool> = (0..frame.height())
                .map(|idx| {
                    frame
                        .columns()
                        .iter()
                        .any(|column| column.get(idx).is_some_and(|value| !value.is_null()))
                })
                .collect();
            frame.retain_rows(&keep);
            Resolved::Table(frame)
        }
        Resolved::Scalar(Value::Null) => Resolved::Missing,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use xwalk_model::{Column, Frame};

    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&Value::Null));
        assert!(is_blank(&json!("")));
        assert!(is_blank(&json!([])));
        assert!(is_blank(&json!({})));
        assert!(!is_blank(&json!(0)));
        assert!(!is_blank(&json!(false)));
        assert!(!is_blank(&json!([null])));
    }

    #[test]
    fn test_fill_missing_recurses() {
        let column = Column::new(
            "grants",
            vec![json!([{"name": null}, {"name": "EC"}]), Value::Null, json!("x")],
        );
        let filled = fill_missing(Resolved::Column(column), &json!(0));
        assert_eq!(
            filled.as_column().unwrap().values,
            vec![json!([{"name": 0}, {"name": "EC"}]), json!(0), json!("x")]
        );
        assert_eq!(
            fill_missing(Resolved::Missing, &json!("n/a")),
            Resolved::Scalar(json!("n/a"))
        );
    }

    #[test]
    fn test_drop_empty_table_rows() {
        let frame = Frame::from_columns(vec![
            Column::new("a", vec![json!(1), Value::Null, Value::Null]),
            Column::new("b", vec![Value::Null, Value::Null, json!(3)]),
        ])
        .unwrap();
        let dropped = drop_empty(Resolved::Table(frame)).into_table().unwrap();

        assert_eq!(dropped.height(), 2);
        assert_eq!(dropped.column("a").unwrap().values, vec![json!(1), Value::Null]);
        assert_eq!(dropped.column("b").unwrap().values, vec![Value::Null, json!(3)]);
    }

    #[test]
    fn test_drop_empty_column_entries() {
        let column = Column::new("size", vec![json!(1), Value::Null, json!(0)]);
        let dropped = drop_empty(Resolved::Column(column)).into_column().unwrap();
        assert_eq!(dropped.values, vec![json!(1), json!(0)]);
        assert!(drop_empty(Resolved::Scalar(Value::Null)).is_missing());
    }
}
