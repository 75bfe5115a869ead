//! Canonical-property access over one bound dataset.

use xwalk_model::{CanonicalProperty, CrosswalkEntry, SchemaKey};
use xwalk_registry::Registry;

use crate::context::Context;
use crate::error::Result;
use crate::options::ResolveOptions;
use crate::resolved::Resolved;
use crate::resolver::resolve;

/// Binds a dataset to one crosswalk entry so canonical properties can be
/// read without knowing the repository's schema.
#[derive(Debug, Clone, Copy)]
pub struct CrosswalkAccessor<'a> {
    entry: &'a CrosswalkEntry,
    context: Context<'a>,
}

impl<'a> CrosswalkAccessor<'a> {
    /// Looks up the entry for `repository`/`object_type` and binds `context`.
    ///
    /// # Errors
    ///
    /// Returns a registry error if the pair is not registered.
    pub fn new(
        registry: &'a Registry,
        repository: &str,
        object_type: &str,
        context: impl Into<Context<'a>>,
    ) -> Result<Self> {
        let entry = registry.lookup(repository, object_type)?;
        Ok(Self::for_entry(entry, context))
    }

    /// Binds `context` to an entry that has already been looked up.
    pub fn for_entry(entry: &'a CrosswalkEntry, context: impl Into<Context<'a>>) -> Self {
        Self {
            entry,
            context: context.into(),
        }
    }

    pub fn entry(&self) -> &'a CrosswalkEntry {
        self.entry
    }

    pub fn schema(&self) -> &'a SchemaKey {
        self.entry.schema()
    }

    /// Resolves a canonical property with default options.
    pub fn get(&self, property: CanonicalProperty) -> Result<Resolved> {
        self.get_with(property, &ResolveOptions::default())
    }

    /// Resolves a canonical property given by name.
    ///
    /// # Errors
    ///
    /// Returns a model error if `name` is not a canonical property.
    pub fn get_by_name(&self, name: &str) -> Result<Resolved> {
        let property = name.parse::<CanonicalProperty>()?;
        self.get(property)
    }

    /// Resolves a canonical property with explicit options.
    pub fn get_with(&self, property: CanonicalProperty, options: &ResolveOptions) -> Result<Resolved> {
        let path = self.entry.get(property);
        tracing::trace!(
            schema = %self.entry.schema(),
            property = %property,
            path = %path,
            "Resolving canonical property"
        );
        resolve(path, self.context, options)
    }

    /// Resolves every canonical property in canonical order.
    pub fn resolve_all(&self) -> Result<Vec<(CanonicalProperty, Resolved)>> {
        CanonicalProperty::ALL
            .into_iter()
            .map(|property| Ok((property, self.get(property)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use xwalk_model::Frame;

    use super::*;
    use crate::error::ResolveError;

    #[test]
    fn test_unknown_schema() {
        let registry = Registry::builtin().unwrap();
        let data = Frame::new(0);
        let err = CrosswalkAccessor::new(&registry, "arxiv", "papers", &data).unwrap_err();
        assert!(matches!(err, ResolveError::Registry(_)));
    }

    #[test]
    fn test_get_by_name_unknown_property() {
        let registry = Registry::builtin().unwrap();
        let data = Frame::new(0);
        let accessor = CrosswalkAccessor::new(&registry, "kaggle", "datasets", &data).unwrap();
        let err = accessor.get_by_name("colour").unwrap_err();
        assert!(matches!(err, ResolveError::Model(_)));
    }

    #[test]
    fn test_get_figshare_url() {
        let registry = Registry::builtin().unwrap();
        let records = [json!({"files": [{"download_url": "https://x/1"}, {"download_url": "https://x/2"}]})];
        let data = Frame::from_records(&records);
        let accessor = CrosswalkAccessor::new(&registry, "figshare", "articles", &data).unwrap();

        let column = accessor.get(CanonicalProperty::Url).unwrap().into_column().unwrap();
        assert_eq!(column.name, "files:download_url");
        assert_eq!(column.values, vec![json!(["https://x/1", "https://x/2"])]);
    }
}
