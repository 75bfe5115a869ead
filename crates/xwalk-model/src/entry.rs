//! Crosswalk entries: one per (repository, object type).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::path::AttributePath;
use crate::property::{CANONICAL_PROPERTY_COUNT, CanonicalProperty};

/// Identifies a crosswalk entry: a repository and one of its object types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaKey {
    /// Repository name (e.g. `zenodo`).
    pub repository: String,
    /// Object type within the repository (e.g. `records`).
    pub object_type: String,
}

impl SchemaKey {
    pub fn new(repository: impl Into<String>, object_type: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            object_type: object_type.into(),
        }
    }

    /// ASCII case-insensitive comparison against a repository/object-type pair.
    pub fn matches(&self, repository: &str, object_type: &str) -> bool {
        self.repository.eq_ignore_ascii_case(repository)
            && self.object_type.eq_ignore_ascii_case(object_type)
    }
}

impl fmt::Display for SchemaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.repository, self.object_type)
    }
}

/// Binds each of the 27 canonical properties to an attribute path.
///
/// The slot array guarantees every property is defined exactly once, in
/// canonical order. Entries are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrosswalkEntry {
    schema: SchemaKey,
    paths: [AttributePath; CANONICAL_PROPERTY_COUNT],
}

impl CrosswalkEntry {
    /// Creates an entry from paths in canonical slot order.
    pub fn new(schema: SchemaKey, paths: [AttributePath; CANONICAL_PROPERTY_COUNT]) -> Self {
        Self { schema, paths }
    }

    /// Creates an entry by asking `path_for` for every canonical property.
    pub fn from_fn<F>(schema: SchemaKey, mut path_for: F) -> Self
    where
        F: FnMut(CanonicalProperty) -> AttributePath,
    {
        let paths = std::array::from_fn(|idx| path_for(CanonicalProperty::ALL[idx]));
        Self { schema, paths }
    }

    pub fn schema(&self) -> &SchemaKey {
        &self.schema
    }

    /// Returns the attribute path for a canonical property.
    pub fn get(&self, property: CanonicalProperty) -> &AttributePath {
        &self.paths[property.index()]
    }

    /// Returns the attribute path for a canonical property name.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownProperty`](crate::ModelError::UnknownProperty)
    /// when `name` is not one of the 27 canonical names.
    pub fn get_by_name(&self, name: &str) -> Result<&AttributePath> {
        let property: CanonicalProperty = name.parse()?;
        Ok(self.get(property))
    }

    /// Iterates over all slots in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalProperty, &AttributePath)> {
        CanonicalProperty::ALL.into_iter().zip(self.paths.iter())
    }

    /// Number of slots that are not [`AttributePath::Absent`].
    pub fn defined_count(&self) -> usize {
        self.paths.iter().filter(|path| !path.is_absent()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelError;

    fn sample_entry() -> CrosswalkEntry {
        CrosswalkEntry::from_fn(SchemaKey::new("dryad", "records"), |prop| match prop {
            CanonicalProperty::UniqueIdentifier => AttributePath::leaf("id"),
            CanonicalProperty::GeographicKeyword => AttributePath::nested("locations", "place"),
            _ => AttributePath::Absent,
        })
    }

    #[test]
    fn test_get_by_property() {
        let entry = sample_entry();
        assert_eq!(
            entry.get(CanonicalProperty::UniqueIdentifier),
            &AttributePath::leaf("id")
        );
        assert!(entry.get(CanonicalProperty::Citation).is_absent());
        assert_eq!(entry.defined_count(), 2);
    }

    #[test]
    fn test_get_by_name() {
        let entry = sample_entry();
        assert_eq!(
            entry.get_by_name("geographic_keyword").unwrap(),
            &AttributePath::nested("locations", "place")
        );
        assert!(matches!(
            entry.get_by_name("popularity"),
            Err(ModelError::UnknownProperty { .. })
        ));
    }

    #[test]
    fn test_iter_in_canonical_order() {
        let entry = sample_entry();
        let props: Vec<CanonicalProperty> = entry.iter().map(|(prop, _)| prop).collect();
        assert_eq!(props, CanonicalProperty::ALL.to_vec());
    }

    #[test]
    fn test_schema_key() {
        let key = SchemaKey::new("Zenodo", "Records");
        assert!(key.matches("zenodo", "RECORDS"));
        assert!(!key.matches("zenodo", "files"));
        assert_eq!(key.to_string(), "Zenodo/Records");
    }
}
