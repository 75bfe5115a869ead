//! Crosswalk document parsing and validation.

use std::collections::BTreeSet;
use std::path::Path;

use serde_json::{Map, Value};
use xwalk_model::{
    AttributePath, CANONICAL_PROPERTY_COUNT, CanonicalProperty, CrosswalkEntry, SchemaKey,
};

use crate::error::{RegistryError, Result};

/// A parsed crosswalk document.
#[derive(Debug, Clone)]
pub struct CrosswalkDocument {
    pub version: Option<String>,
    pub entries: Vec<CrosswalkEntry>,
}

/// Parses a crosswalk document from JSON text.
///
/// `origin` names the source in error messages (a path or `<builtin>`).
pub fn parse_document(text: &str, origin: &str) -> Result<CrosswalkDocument> {
    let root: Value = serde_json::from_str(text).map_err(|source| RegistryError::Json {
        origin: origin.to_string(),
        source,
    })?;

    let Value::Object(root) = root else {
        return Err(invalid(origin, "top level must be an object"));
    };

    let version = match root.get("version") {
        None | Some(Value::Null) => None,
        Some(Value::String(version)) => Some(version.clone()),
        Some(_) => return Err(invalid(origin, "'version' must be a string")),
    };

    let Some(Value::Object(repositories)) = root.get("repositories") else {
        return Err(invalid(origin, "'repositories' must be an object"));
    };

    let mut entries = Vec::new();
    for (repository, object_types) in repositories {
        let Value::Object(object_types) = object_types else {
            return Err(invalid(
                origin,
                &format!("repository '{repository}' must map object types to crosswalks"),
            ));
        };
        for (object_type, slots) in object_types {
            let schema = SchemaKey::new(repository.as_str(), object_type.as_str());
            let Value::Object(slots) = slots else {
                return Err(invalid(
                    origin,
                    &format!("crosswalk {schema} must be an object of canonical properties"),
                ));
            };
            let entry = parse_entry(schema, slots)?;
            tracing::debug!(
                schema = %entry.schema(),
                defined = entry.defined_count(),
                "Parsed crosswalk entry"
            );
            entries.push(entry);
        }
    }

    Ok(CrosswalkDocument { version, entries })
}

/// Reads and parses a crosswalk document from a file.
pub fn load_document(path: &Path) -> Result<CrosswalkDocument> {
    let text = std::fs::read_to_string(path).map_err(|source| RegistryError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&text, &path.display().to_string())
}

/// Builds one entry, requiring every canonical property exactly once.
fn parse_entry(schema: SchemaKey, slots: &Map<String, Value>) -> Result<CrosswalkEntry> {
    let mut paths: [Option<AttributePath>; CANONICAL_PROPERTY_COUNT] = Default::default();

    for (name, value) in slots {
        let property: CanonicalProperty =
            name.parse().map_err(|_| RegistryError::UnknownProperty {
                schema: schema.to_string(),
                name: name.clone(),
            })?;
        let path = AttributePath::from_json(value).map_err(|source| RegistryError::InvalidPath {
            schema: schema.to_string(),
            property,
            source,
        })?;
        if let Some(label) = duplicate_label(&path) {
            return Err(RegistryError::DuplicateLabel {
                schema: schema.to_string(),
                property,
                label,
            });
        }

        let slot = &mut paths[property.index()];
        if slot.is_some() {
            return Err(RegistryError::DuplicateProperty {
                schema: schema.to_string(),
                property,
            });
        }
        *slot = Some(path);
    }

    if let Some(property) = CanonicalProperty::ALL
        .into_iter()
        .find(|property| paths[property.index()].is_none())
    {
        return Err(RegistryError::MissingProperty {
            schema: schema.to_string(),
            property,
        });
    }

    Ok(CrosswalkEntry::from_fn(schema, |property| {
        paths[property.index()]
            .take()
            .unwrap_or(AttributePath::Absent)
    }))
}

/// Finds the first column label shared by two members of a composite.
///
/// Composite members become columns of one table, so their labels must be
/// distinct. Absent members produce no column and are ignored.
fn duplicate_label(path: &AttributePath) -> Option<String> {
    match path {
        AttributePath::Leaf(_) | AttributePath::Absent => None,
        AttributePath::Nested { outer, inner } => {
            duplicate_label(outer).or_else(|| duplicate_label(inner))
        }
        AttributePath::Sequence(members) => {
            let mut seen = BTreeSet::new();
            for member in members.iter().filter(|member| !member.is_absent()) {
                let label = member.label();
                if !seen.insert(label.clone()) {
                    return Some(label);
                }
            }
            members.iter().find_map(duplicate_label)
        }
    }
}

fn invalid(origin: &str, reason: &str) -> RegistryError {
    RegistryError::InvalidDocument {
        origin: origin.to_string(),
        reason: reason.to_string(),
    }
}
