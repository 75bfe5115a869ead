//! Attribute-path resolution.
//!
//! [`resolve`] dispatches on the path variant and on the shape of the
//! data it meets at each step:
//!
//! - `Leaf` looks a key up in a record, or in every row of a table,
//!   column, or record list.
//! - `Sequence` resolves each member against the same context and merges
//!   the results column-wise.
//! - `Nested` resolves `outer`, then resolves `inner` inside each row's
//!   outer value. Records are descended into directly; lists are
//!   descended element by element and collected into a per-row list.
//! - `Absent` resolves to the missing sentinel.
//!
//! Absent data never fails: missing keys, empty lists, and nulls all
//! resolve to null cells, which the final pass either fills with the
//! sentinel or drops.

use serde_json::{Map, Value};
use xwalk_model::{AttributePath, Column, Frame};

use crate::context::Context;
use crate::error::{ResolveError, Result};
use crate::options::{NonContainerPolicy, ResolveOptions};
use crate::passes::{drop_empty, fill_missing, is_blank};
use crate::resolved::Resolved;

/// Resolves `path` against `context`.
///
/// Single-column results collapse into a [`Resolved::Column`] named by the
/// path's string form. After resolution, the drop pass runs when
/// `options.drop` is set; otherwise nulls are replaced with the missing
/// sentinel when one is set.
///
/// # Errors
///
/// Returns [`ResolveError::NonContainer`] when a nested path meets a scalar
/// under [`NonContainerPolicy::Strict`].
pub fn resolve(
    path: &AttributePath,
    context: Context<'_>,
    options: &ResolveOptions,
) -> Result<Resolved> {
    if path.is_absent() || context.is_undefined() {
        return Ok(options.missing_result());
    }

    tracing::trace!(path = %path, context = context.kind(), "Resolving attribute path");
    let resolver = Resolver { options };
    let resolved = match (context, resolver.resolve(path, context)?.degenerate(path)) {
        // A single record yields one cell, not a one-row column.
        (Context::Record(_), Resolved::Column(mut column)) if column.len() == 1 => {
            Resolved::Scalar(column.values.swap_remove(0))
        }
        (_, resolved) => resolved,
    };
    let resolved = match resolved {
        Resolved::Scalar(Value::Null) => Resolved::Missing,
        other => other,
    };

    if options.drop {
        return Ok(drop_empty(resolved));
    }
    Ok(match options.sentinel() {
        Some(sentinel) => fill_missing(resolved, sentinel),
        None => resolved,
    })
}

struct Resolver<'o> {
    options: &'o ResolveOptions,
}

impl Resolver<'_> {
    fn resolve(&self, path: &AttributePath, context: Context<'_>) -> Result<Resolved> {
        if context.is_undefined() {
            return Ok(Resolved::Missing);
        }
        match path {
            AttributePath::Absent => Ok(Resolved::Missing),
            AttributePath::Leaf(key) => Ok(resolve_leaf(key, context)),
            AttributePath::Sequence(members) => self.resolve_sequence(members, context),
            AttributePath::Nested { outer, inner } => self.resolve_nested(outer, inner, context),
        }
    }

    fn resolve_sequence(&self, members: &[AttributePath], context: Context<'_>) -> Result<Resolved> {
        let mut table = Frame::new(context.height());
        for member in members.iter().filter(|member| !member.is_absent()) {
            let resolved = self.resolve(member, context)?;
            push_resolved(&mut table, resolved, &member.label(), None)?;
        }
        Ok(Resolved::Table(table))
    }

    fn resolve_nested(
        &self,
        outer: &AttributePath,
        inner: &AttributePath,
        context: Context<'_>,
    ) -> Result<Resolved> {
        if let AttributePath::Sequence(outers) = outer {
            let mut table = Frame::new(context.height());
            for member in outers.iter().filter(|member| !member.is_absent()) {
                let resolved = self.resolve_nested(member, inner, context)?;
                let label = format!("{member}:{inner}");
                push_resolved(&mut table, resolved, &label, Some(&member.label()))?;
            }
            return Ok(Resolved::Table(table));
        }

        let cells: Vec<Value> = match self.resolve(outer, context)? {
            Resolved::Missing => return Ok(Resolved::Missing),
            Resolved::Scalar(value) => vec![value],
            Resolved::Column(column) => column.values,
            Resolved::Table(frame) => frame.to_records(),
        };

        let mut table = Frame::new(cells.len());
        for member in inner.members().iter().filter(|member| !member.is_absent()) {
            let values = cells
                .iter()
                .map(|cell| self.descend(member, cell))
                .collect::<Result<Vec<_>>>()?;
            table.push_column(Column::new(member.label(), values))?;
        }
        Ok(Resolved::Table(table))
    }

    /// Resolves `path` inside one row's outer value.
    fn descend(&self, path: &AttributePath, cell: &Value) -> Result<Value> {
        match cell {
            Value::Null => Ok(Value::Null),
            Value::Object(record) => self.resolve_in_record(path, record),
            Value::Array(items) if items.is_empty() => Ok(Value::Null),
            Value::Array(items) => {
                let values = items
                    .iter()
                    .map(|item| self.descend(path, item))
                    .collect::<Result<Vec<_>>>()?;
                Ok(aggregate(values))
            }
            scalar => match self.options.non_container {
                NonContainerPolicy::PassThrough => {
                    tracing::debug!(
                        path = %path,
                        value = %scalar,
                        "Nested path met a scalar, passing it through"
                    );
                    Ok(scalar.clone())
                }
                NonContainerPolicy::Strict => Err(ResolveError::NonContainer {
                    path: path.to_string(),
                    value: scalar.to_string(),
                }),
            },
        }
    }

    fn resolve_in_record(&self, path: &AttributePath, record: &Map<String, Value>) -> Result<Value> {
        let resolved = self.resolve(path, Context::Record(record))?;
        Ok(resolved.degenerate(path).into_cell())
    }
}

fn resolve_leaf(key: &str, context: Context<'_>) -> Resolved {
    match context {
        Context::Table(frame) => Resolved::Column(
            frame
                .column(key)
                .cloned()
                .unwrap_or_else(|| Column::nulls(key, frame.height())),
        ),
        Context::Column(column) => Resolved::Column(Column::new(
            key,
            column.iter().map(|row| lookup(key, row)).collect(),
        )),
        Context::RecordList(records) => Resolved::Column(Column::new(
            key,
            records.iter().map(|row| lookup(key, row)).collect(),
        )),
        Context::Record(record) => {
            Resolved::Scalar(record.get(key).cloned().unwrap_or(Value::Null))
        }
        Context::Undefined => Resolved::Missing,
    }
}

/// Keyed lookup in one row. Rows that are not records have no keys.
fn lookup(key: &str, row: &Value) -> Value {
    match row {
        Value::Object(record) => record.get(key).cloned().unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

/// Collects per-element results into a list, or null when every element
/// came back empty.
fn aggregate(values: Vec<Value>) -> Value {
    if values.iter().all(is_blank) {
        Value::Null
    } else {
        Value::Array(values)
    }
}

/// Appends a resolved member to a composite table.
///
/// Single columns take `label`. Columns of a wider table keep their own
/// names, prefixed with `prefix:` when one is given. Scalars are repeated
/// down the rows and missing results become null columns.
fn push_resolved(
    table: &mut Frame,
    resolved: Resolved,
    label: &str,
    prefix: Option<&str>,
) -> Result<()> {
    let height = table.height();
    match resolved {
        Resolved::Missing => table.push_column(Column::nulls(label, height))?,
        Resolved::Scalar(value) => table.push_column(Column::new(label, vec![value; height]))?,
        Resolved::Column(column) => table.push_column(column.renamed(label))?,
        Resolved::Table(frame) if frame.width() == 1 => {
            for column in frame.into_columns() {
                table.push_column(column.renamed(label))?;
            }
        }
        Resolved::Table(frame) => {
            for column in frame.into_columns() {
                let name = match prefix {
                    Some(prefix) => format!("{prefix}:{}", column.name),
                    None => column.name.clone(),
                };
                table.push_column(column.renamed(name))?;
            }
        }
    }
    Ok(())
}
