//! Crosswalk registry for research-data repositories.
//!
//! The registry maps each (repository, object type) pair to a
//! [`CrosswalkEntry`](xwalk_model::CrosswalkEntry): 27 canonical properties,
//! each bound to an attribute path inside that repository's records.
//!
//! # Module Organization
//!
//! - [`registry`]: [`Registry`] lookup and [`RegistryConfig`]
//! - [`loader`]: crosswalk document parsing and validation
//! - [`embedded`]: the built-in crosswalk table
//! - [`error`]: [`RegistryError`]
//!
//! # Example
//!
//! ```
//! use xwalk_model::CanonicalProperty;
//! use xwalk_registry::Registry;
//!
//! let registry = Registry::builtin().unwrap();
//! let entry = registry.lookup("figshare", "articles").unwrap();
//! assert_eq!(entry.get(CanonicalProperty::Url).to_string(), "files:download_url");
//! ```

#![deny(unsafe_code)]

pub mod embedded;
pub mod error;
pub mod loader;
pub mod registry;

pub use error::{RegistryError, Result};
pub use loader::{CrosswalkDocument, load_document, parse_document};
pub use registry::{CROSSWALK_ENV_VAR, Registry, RegistryConfig, RegistrySource};
