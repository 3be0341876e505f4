// Renderer configuration
//
// Record field conventions and drawing constants used by the render
// strategies. Defaults consult HERCULES_* environment variables.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ACCENT_COLOR: &str = "#00ffff";
pub const DEFAULT_SLICE_PALETTE: [&str; 5] = ["#00ffff", "#8b5cf6", "#10b981", "#f59e0b", "#ef4444"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Record field read when a widget binds no value field
    pub value_field: String,
    /// Record field naming an item (tile label, series key, node label)
    pub label_field: String,
    pub unit_field: String,
    /// Record field holding a network node id
    pub id_field: String,
    /// Record field listing the node ids a network node links to
    pub link_field: String,
    pub gauge_min: f64,
    pub gauge_max: f64,
    pub gauge_single_radius: f64,
    pub gauge_multiple_radius: f64,
    pub accent_color: String,
    pub slice_palette: Vec<String>,
    /// Inner radius of a donut as a fraction of the outer radius
    pub donut_hole_ratio: f64,
    pub sparkline_points: usize,
    /// Columns with more distinct values than this get no filter facet
    pub max_facet_values: usize,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            value_field: env_string("HERCULES_VALUE_FIELD", "value"),
            label_field: env_string("HERCULES_LABEL_FIELD", "name"),
            unit_field: env_string("HERCULES_UNIT_FIELD", "unit"),
            id_field: env_string("HERCULES_ID_FIELD", "id"),
            link_field: env_string("HERCULES_LINK_FIELD", "connections"),
            gauge_min: env_f64("HERCULES_GAUGE_MIN", 0.0),
            gauge_max: env_f64("HERCULES_GAUGE_MAX", 100.0),
            gauge_single_radius: 45.0,
            gauge_multiple_radius: 30.0,
            accent_color: env_string("HERCULES_ACCENT_COLOR", DEFAULT_ACCENT_COLOR),
            slice_palette: DEFAULT_SLICE_PALETTE.iter().map(|c| c.to_string()).collect(),
            donut_hole_ratio: 0.6,
            sparkline_points: env_parse("HERCULES_SPARKLINE_POINTS", 12),
            max_facet_values: env_parse("HERCULES_MAX_FACET_VALUES", 12),
        }
    }
}

impl RendererConfig {
    /// Gauge scale span, never zero or non-finite
    pub fn gauge_span(&self) -> f64 {
        let span = self.gauge_max - self.gauge_min;
        if !span.is_finite() || span.abs() < f64::EPSILON {
            1.0
        } else {
            span
        }
    }

    pub fn slice_color(&self, index: usize) -> String {
        if self.slice_palette.is_empty() {
            return self.accent_color.clone();
        }
        self.slice_palette[index % self.slice_palette.len()].clone()
    }
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Like `env_parse`, but NaN and infinities fall back to `default`
fn env_f64(key: &str, default: f64) -> f64 {
    Some(env_parse(key, default))
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
