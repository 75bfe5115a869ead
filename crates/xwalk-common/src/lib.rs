//! Shared utilities for xwalk crates.
//!
//! - [`polars`](mod@polars): `AnyValue`/JSON conversion and
//!   `DataFrame` <-> [`Frame`](xwalk_model::Frame) interop
//! - [`summary`]: word counts, file extensions, and numeric summaries

pub mod polars;
pub mod summary;

pub use polars::{
    any_to_json, any_to_string, dataframe_to_frame, format_numeric, frame_to_dataframe, parse_f64,
    value_to_f64, value_to_string,
};
pub use summary::{
    SummaryStatistics, count_words, file_extensions, flatten_list_column, mean_characters,
};
