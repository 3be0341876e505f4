use std::fs;
use std::path::{Path, PathBuf};

use hercules_core::RendererConfig;

/// High-level configuration for the widget preview demo
#[derive(Clone, Debug)]
pub struct PreviewConfig {
    pub renderer: RendererConfig,
    /// Board file (JSON array of widget descriptors). When unset, the demo
    /// renders one widget per library template over sample records.
    pub board: Option<PathBuf>,
    pub sample_records: usize,
    pub pretty: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            renderer: RendererConfig::default(),
            board: std::env::var("WIDGET_PREVIEW_BOARD")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            sample_records: std::env::var("WIDGET_PREVIEW_SAMPLES")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(6),
            pretty: std::env::var("WIDGET_PREVIEW_PRETTY")
                .map(|v| v != "0" && v != "false")
                .unwrap_or(true),
        }
    }
}

impl PreviewConfig {
    /// Load configuration from a TOML file (path via WIDGET_PREVIEW_CONFIG or ./widget_preview.toml),
    /// overlaying values onto env-driven defaults.
    pub fn load() -> Self {
        let default = Self::default();
        let path =
            std::env::var("WIDGET_PREVIEW_CONFIG").unwrap_or_else(|_| "widget_preview.toml".into());
        let p = Path::new(&path);
        if !p.exists() {
            tracing::info!(target: "widget_preview", path = %path, "No TOML config found; using defaults/env");
            return default;
        }
        match fs::read_to_string(p) {
            Ok(s) => match Self::from_toml(&s, default.clone()) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!(target: "widget_preview", error = %e, "Failed to parse TOML; using defaults");
                    default
                }
            },
            Err(e) => {
                tracing::warn!(target: "widget_preview", error = %e, "Failed to read TOML; using defaults");
                default
            }
        }
    }

    fn from_toml(s: &str, base: PreviewConfig) -> Result<Self, toml::de::Error> {
        let t = toml::from_str::<PreviewToml>(s)?;
        Ok(t.overlay(base))
    }
}

// =========================
// TOML overlay definitions
// =========================

#[derive(Debug, Clone, Default, serde::Deserialize)]
struct PreviewToml {
    pub board: Option<PathBuf>,
    pub sample_records: Option<usize>,
    pub pretty: Option<bool>,
    pub renderer: Option<RendererToml>,
}

impl PreviewToml {
    fn overlay(self, mut base: PreviewConfig) -> PreviewConfig {
        if let Some(b) = self.board {
            base.board = Some(b);
        }
        if let Some(n) = self.sample_records {
            base.sample_records = n;
        }
        if let Some(p) = self.pretty {
            base.pretty = p;
        }
        if let Some(r) = self.renderer {
            r.apply(&mut base.renderer);
        }
        base
    }
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
struct RendererToml {
    pub value_field: Option<String>,
    pub label_field: Option<String>,
    pub unit_field: Option<String>,
    pub id_field: Option<String>,
    pub link_field: Option<String>,
    pub gauge_min: Option<f64>,
    pub gauge_max: Option<f64>,
    pub accent_color: Option<String>,
    pub slice_palette: Option<Vec<String>>,
    pub donut_hole_ratio: Option<f64>,
    pub sparkline_points: Option<usize>,
    pub max_facet_values: Option<usize>,
}
impl RendererToml {
    fn apply(self, r: &mut RendererConfig) {
        if let Some(x) = self.value_field {
            r.value_field = x;
        }
        if let Some(x) = self.label_field {
            r.label_field = x;
        }
        if let Some(x) = self.unit_field {
            r.unit_field = x;
        }
        if let Some(x) = self.id_field {
            r.id_field = x;
        }
        if let Some(x) = self.link_field {
            r.link_field = x;
        }
        if let Some(x) = self.gauge_min.filter(|v| v.is_finite()) {
            r.gauge_min = x;
        }
        if let Some(x) = self.gauge_max.filter(|v| v.is_finite()) {
            r.gauge_max = x;
        }
        if let Some(x) = self.accent_color {
            r.accent_color = x;
        }
        if let Some(x) = self.slice_palette {
            r.slice_palette = x.into_iter().filter(|c| !c.is_empty()).collect();
        }
        if let Some(x) = self.donut_hole_ratio {
            r.donut_hole_ratio = x.clamp(0.0, 0.95);
        }
        if let Some(x) = self.sparkline_points {
            r.sparkline_points = x;
        }
        if let Some(x) = self.max_facet_values {
            r.max_facet_values = x;
        }
    }
}
