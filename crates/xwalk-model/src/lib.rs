//! Data model for repository metadata crosswalks.
//!
//! Research-data repositories each return metadata in their own nested
//! shape. A crosswalk maps a fixed set of canonical property names onto
//! repository-specific attribute locations so every repository can be
//! queried the same way.
//!
//! # Module Organization
//!
//! - [`path`]: [`AttributePath`], the recursive attribute-location descriptor
//! - [`property`]: [`CanonicalProperty`], the 27 canonical names
//! - [`entry`]: [`CrosswalkEntry`] and [`SchemaKey`]
//! - [`frame`]: [`Frame`] and [`Column`], row-aligned tables of JSON values
//! - [`error`]: [`ModelError`]

#![deny(unsafe_code)]

pub mod entry;
pub mod error;
pub mod frame;
pub mod path;
pub mod property;

pub use entry::{CrosswalkEntry, SchemaKey};
pub use error::{ModelError, Result};
pub use frame::{Column, Frame};
pub use path::AttributePath;
pub use property::{CANONICAL_PROPERTY_COUNT, CanonicalProperty};
