// KPI strategy
//
// single: latest reading with trend against the one before it.
// multiple: one tile per record.

use super::instruction::{KpiInstruction, KpiTile, PlaceholderInstruction, RenderInstruction, Trend};
use super::records;
use super::RenderContext;
use crate::catalog::DisplayMode;
use serde_json::Value;

pub(crate) fn render(ctx: &RenderContext<'_>, data: Option<&[Value]>) -> RenderInstruction {
    let Some(records) = data else {
        return PlaceholderInstruction::no_data(ctx.descriptor);
    };

    let mode = ctx.mode();
    let tiles = match mode {
        DisplayMode::Multiple => multiple_tiles(ctx, records),
        _ => single_tile(ctx, records).into_iter().collect(),
    };

    if tiles.is_empty() {
        return PlaceholderInstruction::no_data(ctx.descriptor);
    }

    RenderInstruction::Kpi(KpiInstruction {
        widget_id: ctx.descriptor.id().to_string(),
        title: ctx.descriptor.title().to_string(),
        mode,
        tiles,
        thresholds: ctx.threshold_list(),
    })
}

fn single_tile(ctx: &RenderContext<'_>, records: &[Value]) -> Option<KpiTile> {
    let field = ctx.value_field();
    let readings: Vec<(&Value, f64)> = records
        .iter()
        .filter_map(|r| records::number(r, field).map(|v| (r, v)))
        .collect();
    let (latest_record, value) = *readings.last()?;
    let previous = readings
        .len()
        .checked_sub(2)
        .map(|i| readings[i].1);

    let keep = ctx.config.sparkline_points.max(1);
    let sparkline: Vec<f64> = readings
        .iter()
        .skip(readings.len().saturating_sub(keep))
        .map(|(_, v)| *v)
        .collect();

    Some(KpiTile {
        label: records::text(latest_record, &ctx.config.label_field)
            .unwrap_or_else(|| field.to_string()),
        value,
        unit: records::text(latest_record, &ctx.config.unit_field),
        previous,
        trend: previous.map_or(Trend::Flat, |p| Trend::between(p, value)),
        change_percent: previous.and_then(|p| change_percent(p, value)),
        sparkline,
        band: ctx.band_for(value),
    })
}

fn multiple_tiles(ctx: &RenderContext<'_>, records: &[Value]) -> Vec<KpiTile> {
    let field = ctx.value_field();
    records
        .iter()
        .enumerate()
        .filter_map(|(i, record)| {
            let value = records::number(record, field)?;
            Some(KpiTile {
                label: records::text(record, &ctx.config.label_field)
                    .unwrap_or_else(|| format!("{} #{}", field, i + 1)),
                value,
                unit: records::text(record, &ctx.config.unit_field),
                previous: None,
                trend: Trend::Flat,
                change_percent: None,
                sparkline: Vec::new(),
                band: ctx.band_for(value),
            })
        })
        .collect()
}

fn change_percent(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous.abs() * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_percent_against_zero_is_absent() {
        assert_eq!(change_percent(0.0, 5.0), None);
        assert_eq!(change_percent(50.0, 75.0), Some(50.0));
        assert_eq!(change_percent(-10.0, -5.0), Some(50.0));
    }
}
