// Table strategy
//
// single: flat rows. multiple: rows plus grouping and filter facets.

use super::instruction::{
    FilterFacet, PlaceholderInstruction, RenderInstruction, RowGroup, TableGrouping,
    TableInstruction, TableRow,
};
use super::records;
use super::RenderContext;
use crate::catalog::DisplayMode;
use serde_json::Value;
use std::collections::BTreeSet;

const MISSING_GROUP_KEY: &str = "(none)";

pub(crate) fn render(ctx: &RenderContext<'_>, data: Option<&[Value]>) -> RenderInstruction {
    let Some(records) = data else {
        return PlaceholderInstruction::no_data(ctx.descriptor);
    };

    let mode = ctx.mode();
    let value_field = ctx.value_field();
    let columns = records::columns(records, value_field);

    let rows: Vec<TableRow> = records
        .iter()
        .map(|record| TableRow {
            cells: columns
                .iter()
                .map(|c| records::cell(record, c, value_field))
                .collect(),
            status: records::number(record, value_field).and_then(|v| ctx.band_for(v)),
        })
        .collect();

    let grouping = match mode {
        DisplayMode::Multiple => Some(grouping(ctx, &columns, &rows)),
        _ => None,
    };

    RenderInstruction::Table(TableInstruction {
        widget_id: ctx.descriptor.id().to_string(),
        title: ctx.descriptor.title().to_string(),
        mode,
        columns,
        rows,
        grouping,
    })
}

fn grouping(ctx: &RenderContext<'_>, columns: &[String], rows: &[TableRow]) -> TableGrouping {
    let group_by = ctx
        .descriptor
        .config()
        .x_axis_field
        .clone()
        .unwrap_or_else(|| ctx.config.label_field.clone());
    let group_col = columns.iter().position(|c| *c == group_by);

    let mut groups: Vec<RowGroup> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let key = group_col
            .and_then(|c| cell_text(&row.cells[c]))
            .unwrap_or_else(|| MISSING_GROUP_KEY.to_string());
        match groups.iter_mut().find(|g| g.key == key) {
            Some(g) => g.rows.push(i),
            None => groups.push(RowGroup { key, rows: vec![i] }),
        }
    }

    let filters = columns
        .iter()
        .enumerate()
        .filter_map(|(c, column)| facet(column, rows, c, ctx.config.max_facet_values))
        .collect();

    TableGrouping {
        group_by,
        groups,
        filters,
    }
}

/// Facet for a column of strings with few distinct values.
fn facet(column: &str, rows: &[TableRow], index: usize, max_values: usize) -> Option<FilterFacet> {
    let mut values = BTreeSet::new();
    for row in rows {
        match &row.cells[index] {
            Value::Null => {}
            Value::String(s) => {
                values.insert(s.clone());
            }
            _ => return None,
        }
        if values.len() > max_values {
            return None;
        }
    }
    if values.is_empty() {
        return None;
    }
    Some(FilterFacet {
        column: column.to_string(),
        values: values.into_iter().collect(),
    })
}

fn cell_text(cell: &Value) -> Option<String> {
    match cell {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
