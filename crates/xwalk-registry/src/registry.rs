//! Crosswalk registry: the read-only table of crosswalk entries.
//!
//! The registry is built once at startup and passed explicitly to whatever
//! needs it. It is never mutated after construction.

use std::env;
use std::path::PathBuf;

use xwalk_model::{CrosswalkEntry, SchemaKey};

use crate::embedded::{BUILTIN_CROSSWALK, BUILTIN_ORIGIN};
use crate::error::{RegistryError, Result};
use crate::loader::{CrosswalkDocument, load_document, parse_document};

/// Environment variable pointing at a crosswalk file that replaces the
/// built-in table.
pub const CROSSWALK_ENV_VAR: &str = "XWALK_CROSSWALK";

/// Where the registry's entries come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RegistrySource {
    /// The crosswalk table embedded in the binary.
    #[default]
    Builtin,
    /// A crosswalk JSON document on disk.
    File(PathBuf),
}

/// Configuration for loading the registry.
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    pub source: RegistrySource,
}

impl RegistryConfig {
    /// Configuration for a crosswalk file.
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: RegistrySource::File(path.into()),
        }
    }

    /// Configuration from the environment.
    ///
    /// Uses the file named by `XWALK_CROSSWALK` when it is set and non-empty,
    /// otherwise the built-in table.
    pub fn from_env() -> Self {
        match env::var_os(CROSSWALK_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::with_file(path),
            _ => Self::default(),
        }
    }
}

/// Read-only table of crosswalk entries keyed by repository and object type.
#[derive(Debug, Clone)]
pub struct Registry {
    version: Option<String>,
    entries: Vec<CrosswalkEntry>,
}

impl Registry {
    /// Load the registry with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the crosswalk document cannot be read, is not
    /// valid JSON, or fails validation.
    pub fn load(config: &RegistryConfig) -> Result<Self> {
        let document = match &config.source {
            RegistrySource::Builtin => parse_document(BUILTIN_CROSSWALK, BUILTIN_ORIGIN)?,
            RegistrySource::File(path) => load_document(path)?,
        };
        let registry = Self::from_document(document);
        tracing::info!(
            source = ?config.source,
            version = registry.version.as_deref().unwrap_or("unversioned"),
            entries = registry.entries.len(),
            "Loaded crosswalk registry"
        );
        Ok(registry)
    }

    /// Load the built-in crosswalk table.
    pub fn builtin() -> Result<Self> {
        Self::load(&RegistryConfig::default())
    }

    /// Parse a registry from crosswalk JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        parse_document(text, "<string>").map(Self::from_document)
    }

    /// Build a registry from already-constructed entries.
    pub fn from_entries(version: Option<String>, entries: Vec<CrosswalkEntry>) -> Self {
        Self { version, entries }
    }

    fn from_document(document: CrosswalkDocument) -> Self {
        Self::from_entries(document.version, document.entries)
    }

    /// Version label of the crosswalk table, if it has one.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Look up the entry for a repository and object type
    /// (ASCII case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownSchema`] if the pair is not registered.
    pub fn lookup(&self, repository: &str, object_type: &str) -> Result<&CrosswalkEntry> {
        self.find(repository, object_type)
            .ok_or_else(|| RegistryError::UnknownSchema {
                repository: repository.to_string(),
                object_type: object_type.to_string(),
            })
    }

    /// Find the entry for a repository and object type, if registered.
    pub fn find(&self, repository: &str, object_type: &str) -> Option<&CrosswalkEntry> {
        self.entries
            .iter()
            .find(|entry| entry.schema().matches(repository, object_type))
    }

    /// All entries in registry order.
    pub fn entries(&self) -> &[CrosswalkEntry] {
        &self.entries
    }

    /// Registered repository/object-type pairs in registry order.
    pub fn schemas(&self) -> impl Iterator<Item = &SchemaKey> {
        self.entries.iter().map(CrosswalkEntry::schema)
    }

    /// Distinct repository names in registry order.
    pub fn repositories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for schema in self.schemas() {
            if !names.contains(&schema.repository.as_str()) {
                names.push(&schema.repository);
            }
        }
        names
    }

    /// Object types registered for a repository.
    pub fn object_types(&self, repository: &str) -> Vec<&str> {
        self.schemas()
            .filter(|schema| schema.repository.eq_ignore_ascii_case(repository))
            .map(|schema| schema.object_type.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use xwalk_model::{AttributePath, CanonicalProperty};

    use super::*;

    #[test]
    fn test_load_builtin() {
        let registry = Registry::builtin().expect("load builtin crosswalk");
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.version(), Some("2023-06"));
    }

    #[test]
    fn test_repositories_in_order() {
        let registry = Registry::builtin().expect("load builtin crosswalk");
        assert_eq!(
            registry.repositories(),
            vec![
                "dryad", "figshare", "dataverse", "zenodo", "kaggle", "openml", "uci", "ucsd"
            ]
        );
        assert_eq!(registry.object_types("dataverse"), vec!["datasets", "files"]);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = Registry::builtin().expect("load builtin crosswalk");
        let entry = registry.lookup("Zenodo", "RECORDS").expect("zenodo records");
        assert_eq!(
            entry.get(CanonicalProperty::License),
            &AttributePath::nested("metadata", AttributePath::nested("license", "id"))
        );
    }

    #[test]
    fn test_lookup_unknown_schema() {
        let registry = Registry::builtin().expect("load builtin crosswalk");
        let err = registry.lookup("zenodo", "files").unwrap_err();
        assert!(matches!(err, RegistryError::UnknownSchema { .. }));
        assert!(registry.find("arxiv", "papers").is_none());
    }

    #[test]
    fn test_config_from_env_default() {
        // The variable is not set in the test environment.
        if env::var_os(CROSSWALK_ENV_VAR).is_none() {
            assert_eq!(RegistryConfig::from_env().source, RegistrySource::Builtin);
        }
    }
}
