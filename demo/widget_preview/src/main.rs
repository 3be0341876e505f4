mod config;
use chrono::{Duration, Utc};
use config::PreviewConfig;
use hercules_core::render::CustomRenderRequest;
use hercules_core::widget::check_unique_ids;
use hercules_core::{
    library, ConfigPatch, CustomRenderer, CustomRendererRegistry, ThresholdPreset,
    WidgetDescriptor, WidgetRenderer, WidgetType,
};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Summarizes the records handed to a custom widget
struct RecordSummary;

impl CustomRenderer for RecordSummary {
    fn name(&self) -> String {
        "record_summary".to_string()
    }

    fn render(&self, request: &CustomRenderRequest) -> Value {
        let field = request.config.value_field.as_deref().unwrap_or("value");
        let values: Vec<f64> = request
            .data
            .iter()
            .filter_map(|r| r.get(field).and_then(Value::as_f64))
            .collect();
        let mean = if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        };
        json!({
            "records": request.data.len(),
            "field": field,
            "mean": mean,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging / tracing (stdout carries the instructions, so logs go to stderr)
    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "info,hercules_core=info,widget_preview=info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(target: "widget_preview", "Starting widget preview");

    // Load configuration (defaults + env + optional TOML overlay)
    let cfg = PreviewConfig::load();

    let board = match &cfg.board {
        Some(path) => load_board(path)?,
        None => library_board(cfg.sample_records)?,
    };
    check_unique_ids(&board)?;

    let registry = CustomRendererRegistry::new();
    registry.register(Arc::new(RecordSummary));
    let renderer = WidgetRenderer::new(cfg.renderer.clone()).with_registry(registry);

    let instructions = renderer.render_board(&board);
    let placeholders = instructions.iter().filter(|i| i.is_placeholder()).count();
    if placeholders > 0 {
        warn!(target: "widget_preview", placeholders, "Some widgets rendered as placeholders");
    }
    info!(
        target: "widget_preview",
        widgets = board.len(),
        placeholders,
        "Rendered board"
    );

    let out = if cfg.pretty {
        serde_json::to_string_pretty(&instructions)?
    } else {
        serde_json::to_string(&instructions)?
    };
    println!("{}", out);
    Ok(())
}

/// Board file: a JSON array of widget descriptors, validated on parse
fn load_board(path: &Path) -> Result<Vec<WidgetDescriptor>, Box<dyn std::error::Error>> {
    info!(target: "widget_preview", path = %path.display(), "Loading board");
    let raw = fs::read_to_string(path)?;
    let items: Vec<Value> = serde_json::from_str(&raw)?;
    let board = items
        .into_iter()
        .map(WidgetDescriptor::from_value)
        .collect::<hercules_core::Result<Vec<_>>>()?;
    Ok(board)
}

/// One widget per library template, fed with the same sample records
fn library_board(samples: usize) -> hercules_core::Result<Vec<WidgetDescriptor>> {
    let records = sample_records(samples);
    WidgetType::ALL
        .iter()
        .map(|t| -> hercules_core::Result<WidgetDescriptor> {
            let widget = library::instantiate(*t, format!("{}-1", t))?;
            let patch = match t {
                WidgetType::Chart => ConfigPatch {
                    x_axis_field: Some("timestamp".into()),
                    thresholds: Some(ThresholdPreset::Performance.thresholds()),
                    ..Default::default()
                },
                WidgetType::Custom => ConfigPatch {
                    renderer: Some("record_summary".into()),
                    ..Default::default()
                },
                _ => ConfigPatch {
                    thresholds: Some(ThresholdPreset::Standard.thresholds()),
                    ..Default::default()
                },
            };
            Ok(widget.apply(patch)?.with_data(records.clone()))
        })
        .collect()
}

/// Facility readings spaced one minute apart, ending now
fn sample_records(count: usize) -> Vec<Value> {
    let now = Utc::now();
    let units = ["pump", "valve", "tank", "filter"];
    (0..count)
        .map(|i| {
            let at = now - Duration::minutes((count - i) as i64);
            let id = format!("{}-{}", units[i % units.len()], i / units.len() + 1);
            let next = format!("{}-{}", units[(i + 1) % units.len()], (i + 1) / units.len() + 1);
            json!({
                "id": id,
                "name": units[i % units.len()],
                "timestamp": at.to_rfc3339(),
                "value": 35.0 + ((i * 17) % 60) as f64,
                "unit": "%",
                "connections": if i + 1 < count { vec![next] } else { Vec::new() },
            })
        })
        .collect()
}
