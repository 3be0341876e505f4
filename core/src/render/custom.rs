use super::instruction::{
    CustomInstruction, PlaceholderInstruction, PlaceholderReason, RenderInstruction,
};
use super::RenderContext;
use crate::catalog::DisplayMode;
use crate::widget::WidgetConfig;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// What a custom renderer gets to see
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomRenderRequest {
    pub widget_id: String,
    pub title: String,
    pub mode: DisplayMode,
    pub config: WidgetConfig,
    /// Resolved records; empty when the widget has none
    pub data: Vec<Value>,
}

/// Externally supplied renderer for `custom` widgets
#[cfg_attr(test, mockall::automock)]
pub trait CustomRenderer: Send + Sync {
    /// The unique name descriptors refer to (e.g., "water_flow_diagram")
    fn name(&self) -> String;

    /// Produce the payload handed to the presentation layer
    fn render(&self, request: &CustomRenderRequest) -> Value;
}

/// A registry of custom renderers, keyed by name
#[derive(Clone, Default)]
pub struct CustomRendererRegistry {
    renderers: Arc<DashMap<String, Arc<dyn CustomRenderer>>>,
}

impl CustomRendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer, replacing any previous one with the same name
    pub fn register(&self, renderer: Arc<dyn CustomRenderer>) -> Option<Arc<dyn CustomRenderer>> {
        let name = renderer.name();
        info!(target: "custom_renderers", renderer = %name, "Registering custom renderer");
        self.renderers.insert(name, renderer)
    }

    pub fn unregister(&self, name: &str) -> Option<Arc<dyn CustomRenderer>> {
        self.renderers.remove(name).map(|(_, r)| r)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CustomRenderer>> {
        self.renderers.get(name).map(|r| r.clone())
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.renderers.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

/// Resolve by `config.renderer`, else by widget id, and hand over entirely.
pub(crate) fn render(
    ctx: &RenderContext<'_>,
    registry: &CustomRendererRegistry,
    data: Option<&[Value]>,
) -> RenderInstruction {
    let descriptor = ctx.descriptor;
    let name = descriptor
        .config()
        .renderer
        .clone()
        .unwrap_or_else(|| descriptor.id().to_string());

    let Some(renderer) = registry.get(&name) else {
        return RenderInstruction::Placeholder(PlaceholderInstruction::new(
            descriptor,
            PlaceholderReason::NoRenderer { renderer: name },
        ));
    };

    let request = CustomRenderRequest {
        widget_id: descriptor.id().to_string(),
        title: descriptor.title().to_string(),
        mode: ctx.mode(),
        config: descriptor.config().clone(),
        data: data.map(|d| d.to_vec()).unwrap_or_default(),
    };
    debug!(target: "widget_renderer", widget = %descriptor.id(), renderer = %name, "Delegating to custom renderer");
    let payload = renderer.render(&request);

    RenderInstruction::Custom(CustomInstruction {
        widget_id: descriptor.id().to_string(),
        title: descriptor.title().to_string(),
        renderer: name,
        payload,
    })
}
