//! Attribute-path resolution for repository metadata crosswalks.
//!
//! Given an [`AttributePath`](xwalk_model::AttributePath) from a crosswalk
//! entry and a [`Context`] holding raw repository records, [`resolve`]
//! returns the described values as a [`Resolved`] scalar, column, or
//! table. [`CrosswalkAccessor`] binds a dataset to one registry entry and
//! resolves canonical properties by name.
//!
//! Resolution is pure: it reads borrowed data, never mutates the registry,
//! and is safe to run from many threads at once.

#![deny(unsafe_code)]

pub mod accessor;
pub mod context;
pub mod error;
pub mod options;
pub mod passes;
pub mod resolved;
pub mod resolver;

pub use accessor::CrosswalkAccessor;
pub use context::Context;
pub use error::{ResolveError, Result};
pub use options::{NonContainerPolicy, ResolveOptions};
pub use passes::is_blank;
pub use resolved::Resolved;
pub use resolver::resolve;
