//! Summary helpers for resolved metadata values.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;
use xwalk_model::Column;

use crate::polars::{value_to_f64, value_to_string};

/// Total number of space-separated words across `strings`.
///
/// Splits on single spaces, so runs of spaces count empty words and an
/// empty string counts as one word.
pub fn count_words<I, S>(strings: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    strings
        .into_iter()
        .map(|s| s.as_ref().split(' ').count())
        .sum()
}

/// All suffixes of the final path component, each with its leading dot.
///
/// ```
/// use xwalk_common::file_extensions;
///
/// assert_eq!(file_extensions("archive/data.tar.gz"), vec![".tar", ".gz"]);
/// assert!(file_extensions(".bashrc").is_empty());
/// ```
pub fn file_extensions(path: &str) -> Vec<String> {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    if name.ends_with('.') {
        return Vec::new();
    }
    name.trim_start_matches('.')
        .split('.')
        .skip(1)
        .map(|suffix| format!(".{suffix}"))
        .collect()
}

/// Explodes a column of lists into a column of their elements.
///
/// Null rows and null elements are dropped; scalar rows are kept as a
/// single element.
pub fn flatten_list_column(column: &Column) -> Column {
    let mut values = Vec::with_capacity(column.len());
    for value in column.iter() {
        match value {
            Value::Null => {}
            Value::Array(items) => values.extend(items.iter().filter(|v| !v.is_null()).cloned()),
            other => values.push(other.clone()),
        }
    }
    Column::new(column.name.clone(), values)
}

/// Mean character count of the distinct values.
///
/// Nulls count as the empty string. Returns `None` for an empty input.
pub fn mean_characters<'a, I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Value>,
{
    let unique: BTreeSet<String> = values.into_iter().map(value_to_string).collect();
    if unique.is_empty() {
        return None;
    }
    let total: usize = unique.iter().map(|s| s.chars().count()).sum();
    Some(total as f64 / unique.len() as f64)
}

/// Mean, median, and maximum of a set of numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub max: f64,
}

impl SummaryStatistics {
    /// Summarizes `values`, or `None` when there are none.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted: Vec<f64> = values.into_iter().collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };
        Some(Self {
            count,
            mean: sorted.iter().sum::<f64>() / count as f64,
            median,
            max: sorted[count - 1],
        })
    }

    /// Summarizes the numeric cells, skipping anything that is not a number.
    pub fn from_cells<'a, I>(cells: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        Self::from_values(cells.into_iter().filter_map(value_to_f64))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(["open data", "climate"]), 3);
        assert_eq!(count_words([""]), 1);
        assert_eq!(count_words(["a  b"]), 3);
        assert_eq!(count_words(Vec::<String>::new()), 0);
    }

    #[test]
    fn test_file_extensions() {
        assert_eq!(file_extensions("data.tar.gz"), vec![".tar", ".gz"]);
        assert_eq!(file_extensions("C:\\files\\table.csv"), vec![".csv"]);
        assert!(file_extensions("README").is_empty());
        assert!(file_extensions("trailing.").is_empty());
        assert_eq!(file_extensions("..hidden.txt"), vec![".txt"]);
    }

    #[test]
    fn test_flatten_list_column() {
        let column = Column::new(
            "size",
            vec![json!([10, 20]), Value::Null, json!(5), json!([null, 7])],
        );
        let flat = flatten_list_column(&column);
        assert_eq!(flat.name, "size");
        assert_eq!(flat.values, vec![json!(10), json!(20), json!(5), json!(7)]);
    }

    #[test]
    fn test_mean_characters() {
        let values = [json!("abcd"), json!("ab"), json!("abcd"), Value::Null];
        // unique: "", "ab", "abcd"
        assert_eq!(mean_characters(&values), Some(2.0));
        assert_eq!(mean_characters(&[]), None);
    }

    #[test]
    fn test_summary_statistics() {
        let stats = SummaryStatistics::from_values([3.0, 1.0, 4.0, 2.0]).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.max, 4.0);

        let odd = SummaryStatistics::from_values([5.0, 1.0, 3.0]).unwrap();
        assert_eq!(odd.median, 3.0);
        assert!(SummaryStatistics::from_values([]).is_none());
    }

    #[test]
    fn test_summary_from_cells_skips_non_numeric() {
        let cells = [json!(10), json!("20"), json!("n/a"), Value::Null, json!([1])];
        let stats = SummaryStatistics::from_cells(&cells).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.max, 20.0);
    }
}
