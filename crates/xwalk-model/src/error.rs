//! Error types for crosswalk model construction.

use thiserror::Error;

/// Errors raised while building crosswalk model values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// Name is not one of the 27 canonical properties.
    #[error("unknown canonical property '{name}'")]
    UnknownProperty { name: String },

    /// Attribute path value is not a leaf, sequence, nested pair, or null.
    #[error("malformed attribute path {value}: {reason}")]
    MalformedPath { reason: &'static str, value: String },

    /// Column length does not match the frame height.
    #[error("column '{column}' has {len} rows, expected {height}")]
    ColumnLength {
        column: String,
        len: usize,
        height: usize,
    },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::UnknownProperty {
            name: "colour".to_string(),
        };
        assert_eq!(err.to_string(), "unknown canonical property 'colour'");

        let err = ModelError::MalformedPath {
            reason: "numbers are not attribute paths",
            value: "42".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed attribute path 42: numbers are not attribute paths"
        );
    }
}
