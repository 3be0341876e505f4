// Widget renderer
//
// Pure dispatcher from a validated descriptor plus resolved records to a
// render instruction. One strategy per widget type; failures degrade to
// placeholder instructions instead of errors.

mod chart;
mod custom;
mod gauge;
mod instruction;
mod kpi;
mod network;
mod records;
mod table;

pub use custom::{CustomRenderRequest, CustomRenderer, CustomRendererRegistry};
pub use instruction::{
    ChartBody, ChartInstruction, ChartPoint, CustomInstruction, FilterFacet, GaugeDial,
    GaugeInstruction, KpiInstruction, KpiTile, NetworkEdge, NetworkInstruction, NetworkNode,
    PlaceholderInstruction, PlaceholderReason, RenderInstruction, RowGroup, Series, Slice,
    TableGrouping, TableInstruction, TableRow, Trend,
};

#[cfg(test)]
pub use custom::MockCustomRenderer;

use crate::catalog::{DisplayMode, WidgetType};
use crate::config::RendererConfig;
use crate::threshold::Threshold;
use crate::widget::WidgetDescriptor;
use serde_json::Value;
use tracing::{debug, warn};

/// Per-call view shared by the strategies
pub(crate) struct RenderContext<'a> {
    pub descriptor: &'a WidgetDescriptor,
    pub config: &'a RendererConfig,
}

impl RenderContext<'_> {
    pub fn mode(&self) -> DisplayMode {
        self.descriptor.display_mode()
    }

    /// Bound value field, else the configured record convention
    pub fn value_field(&self) -> &str {
        self.descriptor
            .config()
            .value_field
            .as_deref()
            .unwrap_or(&self.config.value_field)
    }

    pub fn band_for(&self, value: f64) -> Option<Threshold> {
        self.descriptor
            .config()
            .thresholds()
            .and_then(|t| t.band_for(value))
            .cloned()
    }

    pub fn threshold_list(&self) -> Vec<Threshold> {
        self.descriptor
            .config()
            .thresholds()
            .map(|t| t.as_slice().to_vec())
            .unwrap_or_default()
    }
}

/// Dispatches widget descriptors to their render strategy
#[derive(Clone, Default)]
pub struct WidgetRenderer {
    config: RendererConfig,
    custom: CustomRendererRegistry,
}

impl WidgetRenderer {
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config,
            custom: CustomRendererRegistry::new(),
        }
    }

    pub fn with_registry(mut self, registry: CustomRendererRegistry) -> Self {
        self.custom = registry;
        self
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn registry(&self) -> &CustomRendererRegistry {
        &self.custom
    }

    /// Render one widget. Absent or empty `data` yields a "no data"
    /// placeholder from the strategy rather than an error.
    pub fn render(&self, descriptor: &WidgetDescriptor, data: Option<&[Value]>) -> RenderInstruction {
        let data = data.filter(|d| !d.is_empty());
        let ctx = RenderContext {
            descriptor,
            config: &self.config,
        };

        let instruction = match descriptor.widget_type() {
            WidgetType::Kpi => kpi::render(&ctx, data),
            WidgetType::Chart => chart::render(&ctx, data),
            WidgetType::Gauge => gauge::render(&ctx, data),
            WidgetType::Network => network::render(&ctx, data),
            WidgetType::Table => table::render(&ctx, data),
            WidgetType::Custom => custom::render(&ctx, &self.custom, data),
        };

        match instruction.as_placeholder() {
            Some(p) => warn!(
                target: "widget_renderer",
                widget = %descriptor.id(),
                widget_type = %descriptor.widget_type(),
                reason = %p.message,
                "Rendered placeholder"
            ),
            None => debug!(
                target: "widget_renderer",
                widget = %descriptor.id(),
                widget_type = %descriptor.widget_type(),
                mode = %ctx.mode(),
                "Rendered widget"
            ),
        }

        instruction
    }

    /// Render with the records embedded in the descriptor
    pub fn render_embedded(&self, descriptor: &WidgetDescriptor) -> RenderInstruction {
        self.render(descriptor, descriptor.data())
    }

    /// Render a whole board, preserving widget order
    pub fn render_board(&self, widgets: &[WidgetDescriptor]) -> Vec<RenderInstruction> {
        widgets.iter().map(|w| self.render_embedded(w)).collect()
    }
}
