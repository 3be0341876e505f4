// Gauge strategy
//
// Readings are normalized onto the configured scale and clamped to
// [0, 100] before the arc is sized. Out-of-range readings never fail.

use super::instruction::{GaugeDial, GaugeInstruction, PlaceholderInstruction, RenderInstruction};
use super::records;
use super::RenderContext;
use crate::catalog::DisplayMode;
use serde_json::Value;
use std::f64::consts::PI;

pub(crate) fn render(ctx: &RenderContext<'_>, data: Option<&[Value]>) -> RenderInstruction {
    let Some(records) = data else {
        return PlaceholderInstruction::no_data(ctx.descriptor);
    };

    let mode = ctx.mode();
    let radius = match mode {
        DisplayMode::Multiple => ctx.config.gauge_multiple_radius,
        _ => ctx.config.gauge_single_radius,
    };
    let circumference = 2.0 * PI * radius;

    let dials: Vec<GaugeDial> = match mode {
        DisplayMode::Multiple => records
            .iter()
            .enumerate()
            .map(|(i, r)| dial(ctx, i, r, circumference))
            .collect(),
        _ => {
            // Latest record carrying a reading, else the latest record
            let field = ctx.value_field();
            let index = records
                .iter()
                .rposition(|r| records::number(r, field).is_some())
                .unwrap_or(records.len() - 1);
            vec![dial(ctx, index, &records[index], circumference)]
        }
    };

    RenderInstruction::Gauge(GaugeInstruction {
        widget_id: ctx.descriptor.id().to_string(),
        title: ctx.descriptor.title().to_string(),
        mode,
        radius,
        circumference,
        dials,
    })
}

fn dial(ctx: &RenderContext<'_>, index: usize, record: &Value, circumference: f64) -> GaugeDial {
    let field = ctx.value_field();
    let value = records::number(record, field);
    let percent = value.map_or(0.0, |v| normalize(v, ctx.config.gauge_min, ctx.config.gauge_span()));
    let band = value.and_then(|v| ctx.band_for(v));

    GaugeDial {
        label: records::text(record, &ctx.config.label_field)
            .unwrap_or_else(|| format!("{} #{}", field, index + 1)),
        value,
        percent,
        sweep_degrees: percent * 3.6,
        arc_length: percent / 100.0 * circumference,
        color: band
            .as_ref()
            .map(|b| b.color.clone())
            .unwrap_or_else(|| ctx.config.accent_color.clone()),
        band,
    }
}

/// Position of `value` on a scale starting at `min`, in percent, clamped.
pub(crate) fn normalize(value: f64, min: f64, span: f64) -> f64 {
    let percent = (value - min) / span * 100.0;
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}
