// Widget library
//
// Templates behind the "add widget" gallery. Each template seeds a new
// descriptor with the defaults the gallery shows.

use crate::catalog::{ChartType, DataSource, DisplayMode, WidgetType};
use crate::widget::{WidgetConfig, WidgetDescriptor};
use crate::Result;
use serde::Serialize;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WidgetTemplate {
    pub widget_type: WidgetType,
    pub title: &'static str,
    pub description: &'static str,
    pub accent: &'static str,
    pub display_mode: DisplayMode,
    pub data_source: DataSource,
    pub chart_type: Option<ChartType>,
}

impl WidgetTemplate {
    pub fn default_config(&self) -> WidgetConfig {
        WidgetConfig {
            data_source: Some(self.data_source),
            chart_type: self.chart_type,
            display_mode: Some(self.display_mode),
            ..Default::default()
        }
    }
}

const TEMPLATES: &[WidgetTemplate] = &[
    WidgetTemplate {
        widget_type: WidgetType::Kpi,
        title: "KPI Widget",
        description: "Display key performance indicators with sparklines",
        accent: "cyan",
        display_mode: DisplayMode::Single,
        data_source: DataSource::DatabaseValues,
        chart_type: None,
    },
    WidgetTemplate {
        widget_type: WidgetType::Chart,
        title: "Chart Widget",
        description: "Interactive charts for data visualization",
        accent: "green",
        display_mode: DisplayMode::Single,
        data_source: DataSource::DatabaseValues,
        chart_type: Some(ChartType::Line),
    },
    WidgetTemplate {
        widget_type: WidgetType::Gauge,
        title: "Gauge Widget",
        description: "Circular progress indicators and meters",
        accent: "yellow",
        display_mode: DisplayMode::Single,
        data_source: DataSource::DatabaseValues,
        chart_type: None,
    },
    WidgetTemplate {
        widget_type: WidgetType::Network,
        title: "Network Widget",
        description: "Network topology and connection monitoring",
        accent: "purple",
        display_mode: DisplayMode::Multiple,
        data_source: DataSource::Facilities,
        chart_type: None,
    },
    WidgetTemplate {
        widget_type: WidgetType::Table,
        title: "Data Table",
        description: "Tabular data display with sorting and filtering",
        accent: "blue",
        display_mode: DisplayMode::Multiple,
        data_source: DataSource::DatabaseValues,
        chart_type: None,
    },
    WidgetTemplate {
        widget_type: WidgetType::Custom,
        title: "Custom Widget",
        description: "Build your own custom visualization",
        accent: "orange",
        display_mode: DisplayMode::Single,
        data_source: DataSource::DatabaseValues,
        chart_type: None,
    },
];

pub fn templates() -> &'static [WidgetTemplate] {
    TEMPLATES
}

pub fn template_for(widget_type: WidgetType) -> &'static WidgetTemplate {
    match widget_type {
        WidgetType::Kpi => &TEMPLATES[0],
        WidgetType::Chart => &TEMPLATES[1],
        WidgetType::Gauge => &TEMPLATES[2],
        WidgetType::Network => &TEMPLATES[3],
        WidgetType::Table => &TEMPLATES[4],
        WidgetType::Custom => &TEMPLATES[5],
    }
}

/// New descriptor seeded from the gallery template of `widget_type`.
pub fn instantiate(widget_type: WidgetType, id: impl Into<String>) -> Result<WidgetDescriptor> {
    let template = template_for(widget_type);
    let id = id.into();
    debug!(target: "widget_library", widget = %id, widget_type = %widget_type, "Instantiating template");
    WidgetDescriptor::with_config(id, widget_type, template.title, template.default_config())
}
