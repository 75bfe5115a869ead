//! Rendering of resolved values, schemas, and summaries.

use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use xwalk_common::{SummaryStatistics, format_numeric, value_to_string};
use xwalk_model::{CanonicalProperty, CrosswalkEntry, Frame};
use xwalk_registry::Registry;
use xwalk_resolve::Resolved;

use crate::cli::OutputFormatArg;

/// Renders a resolved value in the requested format.
pub fn render_resolved(resolved: &Resolved, format: OutputFormatArg) -> Result<String> {
    match format {
        OutputFormatArg::Table => Ok(resolved_table(resolved).to_string()),
        OutputFormatArg::Json => Ok(serde_json::to_string_pretty(resolved)?),
        OutputFormatArg::Csv => resolved_csv(resolved),
    }
}

/// Header names and rows of display strings for a resolved value.
fn resolved_rows(resolved: &Resolved) -> (Vec<String>, Vec<Vec<String>>) {
    match resolved {
        Resolved::Missing => (vec!["value".to_string()], Vec::new()),
        Resolved::Scalar(value) => (vec!["value".to_string()], vec![vec![value_to_string(value)]]),
        Resolved::Column(column) => (
            vec![column.name.clone()],
            column.iter().map(|value| vec![value_to_string(value)]).collect(),
        ),
        Resolved::Table(frame) => (
            frame.column_names().into_iter().map(String::from).collect(),
            frame_rows(frame),
        ),
    }
}

fn frame_rows(frame: &Frame) -> Vec<Vec<String>> {
    (0..frame.height())
        .map(|idx| {
            frame
                .columns()
                .iter()
                .map(|column| column.get(idx).map(value_to_string).unwrap_or_default())
                .collect()
        })
        .collect()
}

fn resolved_table(resolved: &Resolved) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    if resolved.is_missing() {
        table.set_header(vec![header_cell("value")]);
        table.add_row(vec![dim_cell("(missing)")]);
        return table;
    }

    let (headers, rows) = resolved_rows(resolved);
    let mut header = vec![header_cell("#")];
    header.extend(headers.iter().map(|name| header_cell(name)));
    table.set_header(header);
    align_column(&mut table, 0, CellAlignment::Right);
    for (idx, row) in rows.into_iter().enumerate() {
        let mut cells = vec![dim_cell(idx)];
        cells.extend(row.into_iter().map(|text| {
            if text.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(text)
            }
        }));
        table.add_row(cells);
    }
    table
}

fn resolved_csv(resolved: &Resolved) -> Result<String> {
    let (headers, rows) = resolved_rows(resolved);
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&headers)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    let bytes = writer.into_inner().map_err(csv::IntoInnerError::into_error)?;
    Ok(String::from_utf8(bytes)?)
}

/// Table of registered repository/object-type pairs.
pub fn schemas_table(registry: &Registry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Repository"),
        header_cell("Object type"),
        header_cell("Defined"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for entry in registry.entries() {
        let schema = entry.schema();
        table.add_row(vec![
            Cell::new(&schema.repository).fg(Color::Cyan),
            Cell::new(&schema.object_type),
            Cell::new(format!(
                "{}/{}",
                entry.defined_count(),
                CanonicalProperty::ALL.len()
            )),
        ]);
    }
    table
}

/// Table of canonical properties, with one entry's paths when given.
pub fn properties_table(entry: Option<&CrosswalkEntry>) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("#"), header_cell("Property")];
    if entry.is_some() {
        header.push(header_cell("Attribute path"));
    }
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);

    for property in CanonicalProperty::ALL {
        let mut row = vec![dim_cell(property.index() + 1), Cell::new(property.as_str())];
        if let Some(entry) = entry {
            let path = entry.get(property);
            row.push(if path.is_absent() {
                dim_cell("-")
            } else {
                Cell::new(path.to_string())
            });
        }
        table.add_row(row);
    }
    table
}

/// Table of summary statistics for one property.
pub fn stats_table(label: &str, stats: Option<&SummaryStatistics>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Statistic"), header_cell(label)]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    match stats {
        Some(stats) => {
            table.add_row(vec![Cell::new("count"), Cell::new(stats.count)]);
            table.add_row(vec![Cell::new("mean"), Cell::new(format_numeric(stats.mean))]);
            table.add_row(vec![Cell::new("median"), Cell::new(format_numeric(stats.median))]);
            table.add_row(vec![
                Cell::new("max").add_attribute(Attribute::Bold),
                Cell::new(format_numeric(stats.max)).add_attribute(Attribute::Bold),
            ]);
        }
        None => {
            table.add_row(vec![Cell::new("count"), dim_cell(0)]);
        }
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
