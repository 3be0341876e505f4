// Hercules Core Library
// Configurable widget model, editors and render dispatch for the facility dashboard

pub mod catalog;
pub mod config;
pub mod editor;
pub mod library;
pub mod render;
pub mod threshold;
pub mod widget;

// Export core types
pub use catalog::{ChartType, DataSource, DisplayMode, WidgetType};
pub use config::RendererConfig;
pub use editor::{
    ChartTypeSelector, DataSourceSelector, DisplayModeSelector, Selector, SelectorOption,
    ThresholdEditor,
};
pub use render::{CustomRenderer, CustomRendererRegistry, RenderInstruction, WidgetRenderer};
pub use threshold::{Threshold, ThresholdPatch, ThresholdPreset, ThresholdSet};
pub use widget::{ConfigPatch, WidgetConfig, WidgetDescriptor};

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Index error: index {index} out of bounds for length {len}")]
    Index { index: usize, len: usize },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WidgetError {
    /// A `Config` error means a caller handed the editors or the descriptor a
    /// value the catalog never offered. It is not a user-recoverable condition.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, WidgetError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, WidgetError>;
