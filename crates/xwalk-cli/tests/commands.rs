//! End-to-end command tests over record files on disk.

use std::io::Write;
use std::path::PathBuf;

use serde_json::json;
use tempfile::NamedTempFile;
use xwalk_cli::cli::{OutputFormatArg, SourceArgs};
use xwalk_cli::commands::{load_registry, resolve_source, summarize};
use xwalk_cli::output::render_resolved;
use xwalk_resolve::ResolveOptions;

fn temp_records(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{content}").unwrap();
    file
}

fn source(file: PathBuf, repository: &str, object_type: &str, property: &str) -> SourceArgs {
    SourceArgs {
        file,
        repository: repository.to_string(),
        object_type: object_type.to_string(),
        property: property.to_string(),
    }
}

const ZENODO_RECORDS: &str = r#"{"hits": [
    {"id": 101, "files": [{"size": 2048}, {"size": 1024}], "stats": {"views": 40, "unique_views": 31}},
    {"id": 102, "files": [], "stats": {"views": 3, "unique_views": 2}}
]}"#;

#[test]
fn get_zenodo_views_as_csv() {
    let registry = load_registry(None).unwrap();
    let file = temp_records(".json", ZENODO_RECORDS);
    let args = source(file.path().to_path_buf(), "zenodo", "records", "views");

    let resolved = resolve_source(&registry, &args, &ResolveOptions::default()).unwrap();
    let csv = render_resolved(&resolved, OutputFormatArg::Csv).unwrap();
    insta::assert_snapshot!(csv, @r"
    views,unique_views
    40,31
    3,2
    ");
}

#[test]
fn get_file_size_with_missing_sentinel() {
    let registry = load_registry(None).unwrap();
    let file = temp_records(".json", ZENODO_RECORDS);
    let args = source(file.path().to_path_buf(), "zenodo", "records", "file_size");
    let options = ResolveOptions::new().with_missing(0);

    let resolved = resolve_source(&registry, &args, &options).unwrap();
    assert_eq!(resolved.to_json(), json!([[2048, 1024], 0]));
}

#[test]
fn stats_over_file_sizes() {
    let registry = load_registry(None).unwrap();
    let file = temp_records(".json", ZENODO_RECORDS);
    let args = source(file.path().to_path_buf(), "zenodo", "records", "file_size");

    let resolved = resolve_source(&registry, &args, &ResolveOptions::default()).unwrap();
    let stats = summarize(&resolved).unwrap();
    assert_eq!(stats.count, 2);
    assert_eq!(stats.mean, 1536.0);
    assert_eq!(stats.max, 2048.0);
}

#[test]
fn custom_crosswalk_file() {
    let mut repositories = serde_json::Map::new();
    let mut slots: serde_json::Map<String, serde_json::Value> = xwalk_model::CanonicalProperty::ALL
        .into_iter()
        .map(|property| (property.as_str().to_string(), serde_json::Value::Null))
        .collect();
    slots.insert("license".to_string(), json!({"rights": "id"}));
    repositories.insert("archive".to_string(), json!({ "items": slots }));
    let crosswalk = temp_records(
        ".json",
        &json!({"version": "local", "repositories": repositories}).to_string(),
    );

    let registry = load_registry(Some(crosswalk.path())).unwrap();
    assert_eq!(registry.version(), Some("local"));

    let records = temp_records(".jsonl", "{\"rights\": {\"id\": \"CC0\"}}\n{\"rights\": null}\n");
    let args = source(records.path().to_path_buf(), "archive", "items", "license");
    let resolved = resolve_source(&registry, &args, &ResolveOptions::new().with_drop(true)).unwrap();
    assert_eq!(resolved.to_json(), json!(["CC0"]));
}

#[test]
fn unknown_property_is_an_error() {
    let registry = load_registry(None).unwrap();
    let file = temp_records(".json", ZENODO_RECORDS);
    let args = source(file.path().to_path_buf(), "zenodo", "records", "popularity");

    let err = resolve_source(&registry, &args, &ResolveOptions::default()).unwrap_err();
    assert!(err.to_string().contains("popularity"));
}

#[test]
fn unknown_schema_is_an_error() {
    let registry = load_registry(None).unwrap();
    let file = temp_records(".json", ZENODO_RECORDS);
    let args = source(file.path().to_path_buf(), "arxiv", "papers", "license");

    assert!(resolve_source(&registry, &args, &ResolveOptions::default()).is_err());
}
