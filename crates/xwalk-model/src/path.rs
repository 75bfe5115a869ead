//! Attribute paths: where a canonical value lives inside a raw record.
//!
//! An [`AttributePath`] is a small recursive descriptor:
//!
//! - [`AttributePath::Leaf`]: a key looked up directly in the current context
//! - [`AttributePath::Sequence`]: independent sub-paths resolved side by side
//! - [`AttributePath::Nested`]: resolve `outer`, then resolve `inner` inside it
//! - [`AttributePath::Absent`]: the repository has no such attribute
//!
//! # JSON encoding
//!
//! Crosswalk files store paths as plain JSON:
//!
//! | JSON                               | Path                            |
//! |------------------------------------|---------------------------------|
//! | `"size"`                           | `Leaf("size")`                  |
//! | `["views", "unique_views"]`        | `Sequence([..])`                |
//! | `{"files": "size"}`                | `Nested(Leaf("files"), ..)`     |
//! | `{"outer": [..], "inner": "name"}` | `Nested(<non-leaf outer>, ..)`  |
//! | `null`                             | `Absent`                        |
//!
//! ```
//! use xwalk_model::AttributePath;
//!
//! let path: AttributePath = serde_json::from_str(r#"{"metadata": {"license": "id"}}"#).unwrap();
//! assert_eq!(path.string_form().as_deref(), Some("metadata:license:id"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ModelError, Result};

/// Key pair used when a nested path has a non-leaf outer path.
const EXPLICIT_OUTER: &str = "outer";
const EXPLICIT_INNER: &str = "inner";

/// Recursive descriptor of an attribute location inside a nested record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum AttributePath {
    /// A single key looked up directly in the current context.
    Leaf(String),
    /// Composite: every member is resolved against the same context.
    Sequence(Vec<AttributePath>),
    /// Resolve `outer`, then resolve `inner` against whatever it yields.
    Nested {
        outer: Box<AttributePath>,
        inner: Box<AttributePath>,
    },
    /// The property does not exist for this repository.
    Absent,
}

impl AttributePath {
    /// Creates a leaf path for a single key.
    pub fn leaf(key: impl Into<String>) -> Self {
        Self::Leaf(key.into())
    }

    /// Creates a nested `outer -> inner` path.
    pub fn nested(outer: impl Into<AttributePath>, inner: impl Into<AttributePath>) -> Self {
        Self::Nested {
            outer: Box::new(outer.into()),
            inner: Box::new(inner.into()),
        }
    }

    /// Creates a composite path from its members.
    pub fn sequence<I, P>(members: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<AttributePath>,
    {
        Self::Sequence(members.into_iter().map(Into::into).collect())
    }

    /// Returns true for [`AttributePath::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the members of a composite path, or the path itself as a
    /// one-element slice.
    pub fn members(&self) -> &[AttributePath] {
        match self {
            Self::Sequence(members) => members,
            _ => std::slice::from_ref(self),
        }
    }

    /// Canonical string form used for column labels.
    ///
    /// `Leaf(k)` is `k`; `Nested(o, i)` is `o:i`. Sequences and absent paths
    /// have no string form, and neither does a nested path containing one.
    pub fn string_form(&self) -> Option<String> {
        match self {
            Self::Leaf(key) => Some(key.clone()),
            Self::Nested { outer, inner } => {
                Some(format!("{}:{}", outer.string_form()?, inner.string_form()?))
            }
            Self::Sequence(_) | Self::Absent => None,
        }
    }

    /// Column label: the string form when there is one, otherwise the
    /// display rendering.
    pub fn label(&self) -> String {
        self.string_form().unwrap_or_else(|| self.to_string())
    }

    /// Parses a path from its JSON encoding.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MalformedPath`] for numbers, booleans, empty
    /// keys, empty sequences, and objects that are neither a single
    /// `outer: inner` member nor the explicit `{"outer", "inner"}` pair.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::Absent),
            Value::String(key) if key.is_empty() => {
                Err(malformed("empty keys are not attribute paths", value))
            }
            Value::String(key) => Ok(Self::Leaf(key.clone())),
            Value::Array(items) if items.is_empty() => {
                Err(malformed("sequences need at least one member", value))
            }
            Value::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<Result<Vec<_>>>()
                .map(Self::Sequence),
            Value::Object(map) => nested_from_json(map, value),
            Value::Bool(_) => Err(malformed("booleans are not attribute paths", value)),
            Value::Number(_) => Err(malformed("numbers are not attribute paths", value)),
        }
    }

    /// Renders the path in its JSON encoding.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Leaf(key) => Value::String(key.clone()),
            Self::Sequence(members) => Value::Array(members.iter().map(Self::to_json).collect()),
            Self::Nested { outer, inner } => {
                let mut map = Map::new();
                if let Self::Leaf(key) = outer.as_ref() {
                    map.insert(key.clone(), inner.to_json());
                } else {
                    map.insert(EXPLICIT_OUTER.to_string(), outer.to_json());
                    map.insert(EXPLICIT_INNER.to_string(), inner.to_json());
                }
                Value::Object(map)
            }
            Self::Absent => Value::Null,
        }
    }
}

fn nested_from_json(map: &Map<String, Value>, value: &Value) -> Result<AttributePath> {
    if map.len() == 2 {
        if let (Some(outer), Some(inner)) = (map.get(EXPLICIT_OUTER), map.get(EXPLICIT_INNER)) {
            return Ok(AttributePath::nested(
                AttributePath::from_json(outer)?,
                AttributePath::from_json(inner)?,
            ));
        }
    }

    let mut members = map.iter();
    match (members.next(), members.next()) {
        (Some((outer, _)), None) if outer.is_empty() => {
            Err(malformed("empty keys are not attribute paths", value))
        }
        (Some((outer, inner)), None) => Ok(AttributePath::nested(
            AttributePath::Leaf(outer.clone()),
            AttributePath::from_json(inner)?,
        )),
        _ => Err(malformed(
            "nested paths need exactly one outer key",
            value,
        )),
    }
}

fn malformed(reason: &'static str, value: &Value) -> ModelError {
    ModelError::MalformedPath {
        reason,
        value: value.to_string(),
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(key) => write!(f, "{key}"),
            Self::Nested { outer, inner } => write!(f, "{outer}:{inner}"),
            Self::Sequence(members) => {
                write!(f, "(")?;
                for (idx, member) in members.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{member}")?;
                }
                write!(f, ")")
            }
            Self::Absent => write!(f, "-"),
        }
    }
}

impl From<&str> for AttributePath {
    fn from(key: &str) -> Self {
        Self::Leaf(key.to_string())
    }
}

impl From<String> for AttributePath {
    fn from(key: String) -> Self {
        Self::Leaf(key)
    }
}

impl TryFrom<Value> for AttributePath {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_json(&value)
    }
}

impl From<AttributePath> for Value {
    fn from(path: AttributePath) -> Self {
        path.to_json()
    }
}
