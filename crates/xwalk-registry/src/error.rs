//! Error types for crosswalk registry loading and lookup.

use std::path::PathBuf;

use thiserror::Error;
use xwalk_model::{CanonicalProperty, ModelError};

/// Errors that can occur when loading or querying the crosswalk registry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// No entry for the repository/object-type pair.
    #[error("no crosswalk for repository '{repository}' with object type '{object_type}'")]
    UnknownSchema {
        repository: String,
        object_type: String,
    },

    /// Slot name in a crosswalk document is not a canonical property.
    #[error("unknown canonical property '{name}' in crosswalk {schema}")]
    UnknownProperty { schema: String, name: String },

    /// Crosswalk entry does not define every canonical property.
    #[error("crosswalk {schema} does not define '{property}'")]
    MissingProperty {
        schema: String,
        property: CanonicalProperty,
    },

    /// Two slot names in one entry refer to the same property.
    #[error("crosswalk {schema} defines '{property}' more than once")]
    DuplicateProperty {
        schema: String,
        property: CanonicalProperty,
    },

    /// Attribute path for a slot could not be parsed.
    #[error("invalid attribute path for '{property}' in crosswalk {schema}: {source}")]
    InvalidPath {
        schema: String,
        property: CanonicalProperty,
        #[source]
        source: ModelError,
    },

    /// Two members of one composite path share a column label.
    #[error("crosswalk {schema} maps '{property}' to duplicate column label '{label}'")]
    DuplicateLabel {
        schema: String,
        property: CanonicalProperty,
        label: String,
    },

    /// Crosswalk document has the wrong overall shape.
    #[error("invalid crosswalk document {origin}: {reason}")]
    InvalidDocument { origin: String, reason: String },

    /// Crosswalk document is not valid JSON.
    #[error("failed to parse crosswalk {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Crosswalk file could not be read.
    #[error("failed to read crosswalk file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Model-level failure, such as an unknown property name on lookup.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
