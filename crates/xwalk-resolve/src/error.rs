//! Error types for attribute-path resolution.

use thiserror::Error;
use xwalk_model::ModelError;
use xwalk_registry::RegistryError;

/// Errors that can occur while resolving attribute paths.
///
/// Absent data is never an error: missing keys, empty lists, and null
/// values resolve to the missing sentinel instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResolveError {
    /// A nested path tried to descend into a scalar under the strict policy.
    #[error("cannot resolve '{path}' inside non-container value {value}")]
    NonContainer { path: String, value: String },

    /// Registry lookup failed (unknown repository/object type).
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Model failure (unknown property name, ragged columns).
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;
