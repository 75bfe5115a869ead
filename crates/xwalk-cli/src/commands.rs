//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info_span};
use xwalk_common::{SummaryStatistics, flatten_list_column};
use xwalk_ingest::load_records;
use xwalk_model::{CanonicalProperty, Column};
use xwalk_registry::{Registry, RegistryConfig};
use xwalk_resolve::{CrosswalkAccessor, NonContainerPolicy, ResolveOptions, Resolved};

use crate::cli::{GetArgs, PropertiesArgs, SourceArgs, StatsArgs};
use crate::output::{properties_table, render_resolved, schemas_table, stats_table};

/// Loads the registry from `--crosswalk`, `$XWALK_CROSSWALK`, or the
/// built-in table, in that order.
pub fn load_registry(crosswalk: Option<&Path>) -> Result<Registry> {
    let config = match crosswalk {
        Some(path) => RegistryConfig::with_file(path),
        None => RegistryConfig::from_env(),
    };
    Registry::load(&config).context("load crosswalk registry")
}

pub fn run_schemas(registry: &Registry) -> Result<()> {
    println!("{}", schemas_table(registry));
    Ok(())
}

pub fn run_properties(registry: &Registry, args: &PropertiesArgs) -> Result<()> {
    let entry = match (&args.repository, &args.object_type) {
        (Some(repository), Some(object_type)) => Some(registry.lookup(repository, object_type)?),
        _ => None,
    };
    if let Some(entry) = entry {
        println!("Schema: {}", entry.schema());
    }
    println!("{}", properties_table(entry));
    Ok(())
}

pub fn run_get(registry: &Registry, args: &GetArgs) -> Result<()> {
    let options = resolve_options(args);
    let resolved = resolve_source(registry, &args.source, &options)?;
    println!("{}", render_resolved(&resolved, args.format)?);
    Ok(())
}

pub fn run_stats(registry: &Registry, args: &StatsArgs) -> Result<()> {
    let resolved = resolve_source(registry, &args.source, &ResolveOptions::default())?;
    let stats = summarize(&resolved);
    println!("{}", stats_table(&args.source.property, stats.as_ref()));
    Ok(())
}

/// Builds resolver options from `get` flags.
///
/// `--missing` is parsed as JSON; text that is not valid JSON is used as
/// a plain string.
pub fn resolve_options(args: &GetArgs) -> ResolveOptions {
    let mut options = ResolveOptions::new().with_drop(args.drop);
    if let Some(raw) = &args.missing {
        let sentinel = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.clone()));
        options = options.with_missing(sentinel);
    }
    if args.strict {
        options = options.with_non_container(NonContainerPolicy::Strict);
    }
    options
}

/// Loads the records named by `source` and resolves its property.
pub fn resolve_source(
    registry: &Registry,
    source: &SourceArgs,
    options: &ResolveOptions,
) -> Result<Resolved> {
    let span = info_span!(
        "resolve",
        repository = %source.repository,
        object_type = %source.object_type,
        property = %source.property
    );
    let _guard = span.enter();

    let property: CanonicalProperty = source.property.parse()?;
    let frame = load_records(&source.file)
        .with_context(|| format!("load records from {}", source.file.display()))?;
    let accessor =
        CrosswalkAccessor::new(registry, &source.repository, &source.object_type, &frame)?;
    let resolved = accessor.get_with(property, options)?;
    debug!(rows = resolved.row_count(), "Resolved property");
    Ok(resolved)
}

/// Numeric summary of a resolved value, with list cells flattened.
pub fn summarize(resolved: &Resolved) -> Option<SummaryStatistics> {
    let cells: Vec<Value> = resolved.cells().into_iter().cloned().collect();
    let flat = flatten_list_column(&Column::new("values", cells));
    SummaryStatistics::from_cells(flat.iter())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;
    use xwalk_model::Frame;

    use super::*;
    use crate::cli::OutputFormatArg;

    fn get_args(missing: Option<&str>, drop: bool, strict: bool) -> GetArgs {
        GetArgs {
            source: SourceArgs {
                file: PathBuf::from("records.json"),
                repository: "zenodo".to_string(),
                object_type: "records".to_string(),
                property: "views".to_string(),
            },
            missing: missing.map(String::from),
            drop,
            strict,
            format: OutputFormatArg::Table,
        }
    }

    #[test]
    fn test_resolve_options_parses_json_sentinel() {
        let options = resolve_options(&get_args(Some("0"), false, false));
        assert_eq!(options.sentinel(), Some(&json!(0)));

        let options = resolve_options(&get_args(Some("n/a"), false, true));
        assert_eq!(options.sentinel(), Some(&json!("n/a")));
        assert_eq!(options.non_container, NonContainerPolicy::Strict);

        let options = resolve_options(&get_args(None, true, false));
        assert!(options.sentinel().is_none());
        assert!(options.drop);
    }

    #[test]
    fn test_summarize_flattens_lists() {
        let frame = Frame::from_columns(vec![
            Column::new("views", vec![json!(10), json!(30)]),
            Column::new("unique_views", vec![json!([5, 15]), Value::Null]),
        ])
        .unwrap();
        let stats = summarize(&Resolved::Table(frame)).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.max, 30.0);
        assert_eq!(stats.median, 12.5);
        assert!(summarize(&Resolved::Missing).is_none());
    }
}
