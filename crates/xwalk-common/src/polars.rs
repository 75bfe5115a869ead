//! Polars interop.
//!
//! Converts polars `AnyValue`s to JSON cells and moves whole tables between
//! [`DataFrame`] and [`Frame`].

use polars::prelude::*;
use serde_json::{Number, Value};
use xwalk_model::Frame;

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null` and formats floats without trailing
/// zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use xwalk_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Float64(2.50)), "2.5");
/// assert_eq!(any_to_string(AnyValue::String("hello")), "hello");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => {
            let s = other.to_string();
            // Display wraps some values in quotes
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    }
}

/// Converts a Polars `AnyValue` to a JSON cell.
///
/// Numbers and booleans keep their type, non-finite floats and nulls
/// become `Null`, and anything else (dates, nested types) is rendered as
/// a string.
pub fn any_to_json(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::Int8(v) => Value::from(v),
        AnyValue::Int16(v) => Value::from(v),
        AnyValue::Int32(v) => Value::from(v),
        AnyValue::Int64(v) => Value::from(v),
        AnyValue::UInt8(v) => Value::from(v),
        AnyValue::UInt16(v) => Value::from(v),
        AnyValue::UInt32(v) => Value::from(v),
        AnyValue::UInt64(v) => Value::from(v),
        AnyValue::Float32(v) => float_to_json(f64::from(v)),
        AnyValue::Float64(v) => float_to_json(v),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        other => Value::String(any_to_string(other)),
    }
}

fn float_to_json(v: f64) -> Value {
    Number::from_f64(v).map_or(Value::Null, Value::Number)
}

/// Formats a floating-point number without trailing zeros after the
/// decimal point.
///
/// # Examples
///
/// ```
/// use xwalk_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(40.0), "40");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Reads a JSON cell as a number.
///
/// Numeric strings are parsed; nulls, booleans, lists, and records are
/// not numbers.
pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_f64(s),
        _ => None,
    }
}

/// Renders a JSON cell for display: strings unquoted, null empty, other
/// values as compact JSON.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => n.as_f64().map_or_else(|| n.to_string(), format_numeric),
        other => other.to_string(),
    }
}

/// Converts a polars DataFrame into a [`Frame`], one JSON cell per value.
pub fn dataframe_to_frame(df: &DataFrame) -> PolarsResult<Frame> {
    let height = df.height();
    let mut frame = Frame::new(height);
    for col in df.get_columns() {
        let series = col.as_materialized_series();
        let values = (0..height)
            .map(|idx| series.get(idx).map(any_to_json))
            .collect::<PolarsResult<Vec<_>>>()?;
        frame
            .push_column(xwalk_model::Column::new(col.name().as_str(), values))
            .map_err(|err| PolarsError::ShapeMismatch(err.to_string().into()))?;
    }
    Ok(frame)
}

/// The narrowest polars dtype that holds every non-null cell of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Int,
    Float,
    Bool,
    Text,
}

fn infer_kind(values: &[Value]) -> CellKind {
    let mut present = values.iter().filter(|value| !value.is_null()).peekable();
    if present.peek().is_none() {
        return CellKind::Text;
    }
    let present: Vec<&Value> = present.collect();
    if present.iter().all(|value| value.as_i64().is_some()) {
        CellKind::Int
    } else if present.iter().all(|value| value.is_number()) {
        CellKind::Float
    } else if present.iter().all(|value| value.is_boolean()) {
        CellKind::Bool
    } else {
        CellKind::Text
    }
}

fn column_to_series(column: &xwalk_model::Column) -> Series {
    let name: PlSmallStr = column.name.as_str().into();
    let values = &column.values;
    match infer_kind(values) {
        CellKind::Int => Series::new(name, values.iter().map(Value::as_i64).collect::<Vec<_>>()),
        CellKind::Float => Series::new(name, values.iter().map(Value::as_f64).collect::<Vec<_>>()),
        CellKind::Bool => Series::new(name, values.iter().map(Value::as_bool).collect::<Vec<_>>()),
        CellKind::Text => Series::new(
            name,
            values
                .iter()
                .map(|value| (!value.is_null()).then(|| value_to_string(value)))
                .collect::<Vec<_>>(),
        ),
    }
}

/// Converts a [`Frame`] into a polars DataFrame.
///
/// Each column gets the narrowest dtype that fits its cells (integer,
/// float, boolean, or string). Lists and records are stored as JSON text.
pub fn frame_to_dataframe(frame: &Frame) -> PolarsResult<DataFrame> {
    let columns = frame
        .columns()
        .iter()
        .map(|column| column_to_series(column).into_column())
        .collect();
    DataFrame::new(columns)
}
