//! The data an attribute path is resolved against.

use serde_json::{Map, Value};
use xwalk_model::{Column, Frame};

/// Borrowed view of the data being queried.
///
/// The variant is chosen from the concrete value once per resolution step;
/// callers never declare the shape of nested data up front.
#[derive(Debug, Clone, Copy)]
pub enum Context<'a> {
    /// Named row-aligned columns.
    Table(&'a Frame),
    /// One column of per-row values (records, lists, or scalars).
    Column(&'a Column),
    /// A single nested record.
    Record(&'a Map<String, Value>),
    /// A list of records, one row per element.
    RecordList(&'a [Value]),
    /// Nothing to resolve against.
    Undefined,
}

impl<'a> Context<'a> {
    /// Infers the context from a JSON value.
    ///
    /// Objects become records, arrays become record lists, and anything
    /// else is undefined.
    pub fn from_value(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Self::Record(map),
            Value::Array(items) => Self::RecordList(items),
            _ => Self::Undefined,
        }
    }

    /// Number of rows a row-aligned result must have.
    pub fn height(&self) -> usize {
        match self {
            Self::Table(frame) => frame.height(),
            Self::Column(column) => column.len(),
            Self::RecordList(items) => items.len(),
            Self::Record(_) => 1,
            Self::Undefined => 0,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Short name of the variant, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Table(_) => "table",
            Self::Column(_) => "column",
            Self::Record(_) => "record",
            Self::RecordList(_) => "record_list",
            Self::Undefined => "undefined",
        }
    }
}

impl<'a> From<&'a Frame> for Context<'a> {
    fn from(frame: &'a Frame) -> Self {
        Self::Table(frame)
    }
}

impl<'a> From<&'a Column> for Context<'a> {
    fn from(column: &'a Column) -> Self {
        Self::Column(column)
    }
}

impl<'a> From<&'a Map<String, Value>> for Context<'a> {
    fn from(record: &'a Map<String, Value>) -> Self {
        Self::Record(record)
    }
}

impl<'a> From<&'a [Value]> for Context<'a> {
    fn from(records: &'a [Value]) -> Self {
        Self::RecordList(records)
    }
}

impl<'a> From<&'a Vec<Value>> for Context<'a> {
    fn from(records: &'a Vec<Value>) -> Self {
        Self::RecordList(records)
    }
}

impl<'a> From<&'a Value> for Context<'a> {
    fn from(value: &'a Value) -> Self {
        Self::from_value(value)
    }
}
