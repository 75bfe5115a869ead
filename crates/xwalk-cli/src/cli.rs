//! CLI argument definitions for `xwalk`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "xwalk",
    version,
    about = "Query research-data repository metadata through canonical properties",
    long_about = "Query research-data repository metadata through canonical properties.\n\n\
                  A crosswalk maps 27 canonical property names onto each repository's\n\
                  own record layout, so Zenodo, Dryad, Figshare, Dataverse, Kaggle,\n\
                  OpenML, UCI, and UCSD records can be read the same way."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Crosswalk JSON file replacing the built-in table
    /// (defaults to $XWALK_CROSSWALK when set).
    #[arg(long = "crosswalk", value_name = "PATH", global = true)]
    pub crosswalk: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List registered repository/object-type pairs.
    Schemas,

    /// List the canonical properties, optionally with one schema's paths.
    Properties(PropertiesArgs),

    /// Resolve a canonical property over a record file.
    Get(GetArgs),

    /// Summarize the numeric values of a canonical property.
    Stats(StatsArgs),
}

#[derive(Args)]
pub struct PropertiesArgs {
    /// Repository name (e.g. zenodo).
    #[arg(short = 'r', long = "repository", requires = "object_type")]
    pub repository: Option<String>,

    /// Object type within the repository (e.g. records).
    #[arg(short = 't', long = "object-type", requires = "repository")]
    pub object_type: Option<String>,
}

/// Identifies the records to read and how to interpret them.
#[derive(Args)]
pub struct SourceArgs {
    /// Record file (.json, .jsonl, .ndjson, or .csv).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Repository the records come from.
    #[arg(short = 'r', long = "repository")]
    pub repository: String,

    /// Object type of the records.
    #[arg(short = 't', long = "object-type")]
    pub object_type: String,

    /// Canonical property to resolve (e.g. license, file_size).
    #[arg(short = 'p', long = "property")]
    pub property: String,
}

#[derive(Args)]
pub struct GetArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Value used in place of missing data, as JSON (plain text is taken
    /// as a string).
    #[arg(long = "missing", value_name = "JSON", conflicts_with = "drop")]
    pub missing: Option<String>,

    /// Drop empty rows instead of filling them.
    #[arg(long = "drop")]
    pub drop: bool,

    /// Fail when a nested path meets a plain value instead of a record.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
    Csv,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_get() {
        let cli = Cli::try_parse_from([
            "xwalk", "get", "records.json", "-r", "zenodo", "-t", "records", "-p", "views",
            "--missing", "0", "--format", "json",
        ])
        .unwrap();
        let Command::Get(args) = cli.command else {
            panic!("expected get");
        };
        assert_eq!(args.source.repository, "zenodo");
        assert_eq!(args.missing.as_deref(), Some("0"));
        assert_eq!(args.format, OutputFormatArg::Json);
        assert!(!args.drop);
    }

    #[test]
    fn test_missing_conflicts_with_drop() {
        let result = Cli::try_parse_from([
            "xwalk", "get", "r.json", "-r", "a", "-t", "b", "-p", "c", "--missing", "0", "--drop",
        ]);
        assert!(result.is_err());
    }
}
