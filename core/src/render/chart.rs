// Chart strategy
//
// Shape comes from the chart type: line/bar/area/scatter get series of
// points, pie/donut get slices. xy-chart needs both axis fields bound.

use super::instruction::{
    ChartBody, ChartInstruction, ChartPoint, PlaceholderInstruction, PlaceholderReason,
    RenderInstruction, Series, Slice,
};
use super::records;
use super::RenderContext;
use crate::catalog::{ChartType, DisplayMode};
use serde_json::Value;

const UNNAMED_SERIES: &str = "series";

pub(crate) fn render(ctx: &RenderContext<'_>, data: Option<&[Value]>) -> RenderInstruction {
    let descriptor = ctx.descriptor;
    let config = descriptor.config();
    let mode = ctx.mode();
    let chart_type = config.chart_type.unwrap_or(ChartType::Line);

    // Binding problems win over missing data: the fix is in the editor.
    if mode == DisplayMode::XyChart {
        let mut missing = Vec::new();
        if config.x_axis_field.is_none() {
            missing.push("xAxisField".to_string());
        }
        if config.y_axis_field.is_none() {
            missing.push("yAxisField".to_string());
        }
        if !missing.is_empty() {
            return RenderInstruction::Placeholder(PlaceholderInstruction::new(
                descriptor,
                PlaceholderReason::UnboundField { fields: missing },
            ));
        }
    }

    let Some(records) = data else {
        return PlaceholderInstruction::no_data(descriptor);
    };

    let y_field = match mode {
        DisplayMode::XyChart => config.y_axis_field.clone(),
        _ => None,
    }
    .unwrap_or_else(|| ctx.value_field().to_string());

    let body = if chart_type.is_radial() {
        radial(ctx, records, chart_type, &y_field)
    } else {
        cartesian(ctx, records, mode, &y_field)
    };

    let Some(body) = body else {
        return PlaceholderInstruction::no_data(descriptor);
    };

    RenderInstruction::Chart(ChartInstruction {
        widget_id: descriptor.id().to_string(),
        title: descriptor.title().to_string(),
        chart_type,
        mode,
        body,
        thresholds: ctx.threshold_list(),
    })
}

fn cartesian(
    ctx: &RenderContext<'_>,
    records: &[Value],
    mode: DisplayMode,
    y_field: &str,
) -> Option<ChartBody> {
    let x_field = ctx.descriptor.config().x_axis_field.clone();

    let point = |index: usize, record: &Value| -> Option<ChartPoint> {
        let y = records::number(record, y_field)?;
        // Categorical or missing x values fall back to the record index
        let x = x_field
            .as_deref()
            .and_then(|f| records::axis_value(record, f))
            .unwrap_or(index as f64);
        Some(ChartPoint { x, y })
    };

    let mut series = match mode {
        DisplayMode::Multiple => {
            let mut groups: Vec<Series> = Vec::new();
            for (i, record) in records.iter().enumerate() {
                let Some(p) = point(i, record) else { continue };
                let name = records::text(record, &ctx.config.label_field)
                    .unwrap_or_else(|| UNNAMED_SERIES.to_string());
                match groups.iter_mut().find(|s| s.name == name) {
                    Some(s) => s.points.push(p),
                    None => groups.push(Series {
                        name,
                        points: vec![p],
                        derived: false,
                    }),
                }
            }
            groups
        }
        _ => {
            let points: Vec<ChartPoint> = records
                .iter()
                .enumerate()
                .filter_map(|(i, r)| point(i, r))
                .collect();
            if points.is_empty() {
                Vec::new()
            } else {
                vec![Series {
                    name: y_field.to_string(),
                    points,
                    derived: false,
                }]
            }
        }
    };

    if series.is_empty() {
        return None;
    }

    if mode == DisplayMode::Trend {
        if let Some(line) = trend_line(&series[0].points) {
            series.push(line);
        }
    }

    Some(ChartBody::Cartesian {
        x_field,
        y_field: y_field.to_string(),
        series,
    })
}

fn radial(
    ctx: &RenderContext<'_>,
    records: &[Value],
    chart_type: ChartType,
    value_field: &str,
) -> Option<ChartBody> {
    let label_field = ctx
        .descriptor
        .config()
        .x_axis_field
        .clone()
        .unwrap_or_else(|| ctx.config.label_field.clone());

    // Sum by label, first-seen order
    let mut totals: Vec<(String, f64)> = Vec::new();
    for (i, record) in records.iter().enumerate() {
        let Some(value) = records::number(record, value_field) else { continue };
        let label =
            records::text(record, &label_field).unwrap_or_else(|| format!("item {}", i + 1));
        let value = value.max(0.0);
        match totals.iter_mut().find(|(l, _)| *l == label) {
            Some((_, sum)) => *sum += value,
            None => totals.push((label, value)),
        }
    }

    if totals.is_empty() {
        return None;
    }

    let grand_total: f64 = totals.iter().map(|(_, v)| v).sum();
    let slices = totals
        .into_iter()
        .enumerate()
        .map(|(i, (label, value))| Slice {
            fraction: if grand_total > 0.0 { value / grand_total } else { 0.0 },
            color: ctx.config.slice_color(i),
            label,
            value,
        })
        .collect();

    let hole_ratio = match chart_type {
        ChartType::Donut => ctx.config.donut_hole_ratio,
        _ => 0.0,
    };

    Some(ChartBody::Radial { hole_ratio, slices })
}

/// Least-squares line over `points`, sampled at the first and last x.
fn trend_line(points: &[ChartPoint]) -> Option<Series> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / n;
    let sxx: f64 = points.iter().map(|p| (p.x - mean_x).powi(2)).sum();
    let sxy: f64 = points
        .iter()
        .map(|p| (p.x - mean_x) * (p.y - mean_y))
        .sum();
    let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };
    let intercept = mean_y - slope * mean_x;

    let first = points.first()?.x;
    let last = points.last()?.x;
    Some(Series {
        name: "trend".to_string(),
        points: vec![
            ChartPoint {
                x: first,
                y: intercept + slope * first,
            },
            ChartPoint {
                x: last,
                y: intercept + slope * last,
            },
        ],
        derived: true,
    })
}
