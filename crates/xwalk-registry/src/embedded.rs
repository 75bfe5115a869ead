//! Embedded crosswalk data.
//!
//! The built-in crosswalk table is embedded at compile time using
//! `include_str!()` and parsed with the same loader as user-supplied files.
//!
//! # Structure
//!
//! ```text
//! {
//!   "version": "...",
//!   "repositories": {
//!     "<repository>": {
//!       "<object type>": { "<canonical property>": <attribute path>, ... }
//!     }
//!   }
//! }
//! ```
//!
//! Every object type lists all 27 canonical properties; `null` marks a
//! property the repository does not provide.

/// Built-in crosswalk for dryad, figshare, dataverse, zenodo, kaggle,
/// openml, uci, and ucsd.
pub const BUILTIN_CROSSWALK: &str = include_str!("../data/crosswalk.json");

/// Origin label used in diagnostics for the embedded table.
pub const BUILTIN_ORIGIN: &str = "<builtin>";
