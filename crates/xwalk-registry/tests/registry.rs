//! Integration tests for the crosswalk registry.

use std::io::Write;

use serde_json::{Map, Value, json};
use tempfile::NamedTempFile;
use xwalk_model::{AttributePath, CanonicalProperty};
use xwalk_registry::{Registry, RegistryConfig, RegistryError};

fn builtin() -> Registry {
    Registry::builtin().expect("load builtin crosswalk")
}

#[test]
fn every_builtin_entry_defines_all_slots() {
    let registry = builtin();
    for entry in registry.entries() {
        assert_eq!(entry.iter().count(), 27, "{}", entry.schema());
        assert!(entry.defined_count() > 0, "{} is empty", entry.schema());
    }
}

#[test]
fn builtin_schemas_are_registered() {
    let registry = builtin();
    let schemas: Vec<String> = registry.schemas().map(ToString::to_string).collect();
    assert_eq!(
        schemas,
        vec![
            "dryad/records",
            "figshare/articles",
            "dataverse/datasets",
            "dataverse/files",
            "zenodo/records",
            "kaggle/datasets",
            "openml/datasets",
            "uci/datasets",
            "ucsd/records",
        ]
    );
}

#[test]
fn builtin_paths_match_repository_shapes() {
    let registry = builtin();

    let zenodo = registry.lookup("zenodo", "records").unwrap();
    assert_eq!(zenodo.get(CanonicalProperty::Url).to_string(), "files:links:self");
    assert_eq!(
        zenodo.get(CanonicalProperty::Views),
        &AttributePath::nested("stats", AttributePath::sequence(["views", "unique_views"]))
    );
    assert_eq!(
        zenodo.get(CanonicalProperty::FundingAgency).to_string(),
        "metadata:grants:funder:name"
    );

    let kaggle = registry.lookup("kaggle", "datasets").unwrap();
    assert_eq!(
        kaggle.get(CanonicalProperty::Keyword),
        &AttributePath::sequence([
            AttributePath::leaf("keywords"),
            AttributePath::nested("tags", "name"),
        ])
    );

    let ucsd = registry.lookup("ucsd", "records").unwrap();
    assert_eq!(
        ucsd.get(CanonicalProperty::PrimaryManuscript).to_string(),
        "(Note:related publications, Related resource)"
    );

    let files = registry.lookup("dataverse", "files").unwrap();
    assert!(files.get(CanonicalProperty::UniqueIdentifier).is_absent());
    assert_eq!(files.defined_count(), 6);
}

#[test]
fn entry_rejects_unknown_property_names() {
    let registry = builtin();
    let entry = registry.lookup("dryad", "records").unwrap();
    assert!(entry.get_by_name("popularity").is_err());
    assert_eq!(
        entry.get_by_name("geographic_keyword").unwrap(),
        &AttributePath::nested("locations", "place")
    );
}

#[test]
fn registry_loads_from_file() {
    let slots: Map<String, Value> = CanonicalProperty::ALL
        .into_iter()
        .map(|prop| {
            let path = match prop {
                CanonicalProperty::UniqueIdentifier => json!("doi"),
                CanonicalProperty::FileSize => json!({"assets": "bytes"}),
                _ => Value::Null,
            };
            (prop.as_str().to_string(), path)
        })
        .collect();
    let document = json!({
        "version": "local-1",
        "repositories": { "osf": { "projects": slots } }
    });

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{document}").unwrap();

    let registry = Registry::load(&RegistryConfig::with_file(file.path())).expect("load file");
    assert_eq!(registry.version(), Some("local-1"));
    let entry = registry.lookup("osf", "projects").unwrap();
    assert_eq!(entry.get(CanonicalProperty::FileSize).to_string(), "assets:bytes");
    assert!(registry.lookup("zenodo", "records").is_err());
}

#[test]
fn registry_reports_missing_file() {
    let err = Registry::load(&RegistryConfig::with_file("/nonexistent/crosswalk.json")).unwrap_err();
    assert!(matches!(err, RegistryError::FileRead { .. }));
}
