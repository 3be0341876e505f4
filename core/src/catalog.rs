// Capability catalog
//
// Static, process-wide registries describing which display modes each widget
// type accepts and which chart shapes and data sources exist. Read-only.

use crate::{Result, WidgetError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of widget kinds. Decides the render strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetType {
    Kpi,
    Chart,
    Gauge,
    Network,
    Table,
    Custom,
}

impl WidgetType {
    pub const ALL: [WidgetType; 6] = [
        WidgetType::Kpi,
        WidgetType::Chart,
        WidgetType::Gauge,
        WidgetType::Network,
        WidgetType::Table,
        WidgetType::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetType::Kpi => "kpi",
            WidgetType::Chart => "chart",
            WidgetType::Gauge => "gauge",
            WidgetType::Network => "network",
            WidgetType::Table => "table",
            WidgetType::Custom => "custom",
        }
    }

    /// Only chart widgets carry a chart type.
    pub fn supports_chart_type(&self) -> bool {
        matches!(self, WidgetType::Chart)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Pie,
    Donut,
    Area,
    Scatter,
}

impl ChartType {
    pub const ALL: [ChartType; 6] = [
        ChartType::Line,
        ChartType::Bar,
        ChartType::Pie,
        ChartType::Donut,
        ChartType::Area,
        ChartType::Scatter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Pie => "pie",
            ChartType::Donut => "donut",
            ChartType::Area => "area",
            ChartType::Scatter => "scatter",
        }
    }

    /// Pie and donut draw slices instead of series.
    pub fn is_radial(&self) -> bool {
        matches!(self, ChartType::Pie | ChartType::Donut)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Single,
    Multiple,
    #[serde(rename = "xy-chart")]
    XyChart,
    Trend,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 4] = [
        DisplayMode::Single,
        DisplayMode::Multiple,
        DisplayMode::XyChart,
        DisplayMode::Trend,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Single => "single",
            DisplayMode::Multiple => "multiple",
            DisplayMode::XyChart => "xy-chart",
            DisplayMode::Trend => "trend",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    DatabaseValues,
    Facilities,
    Metrics,
    Alerts,
    Energy,
    Quality,
    Maintenance,
}

impl DataSource {
    pub const ALL: [DataSource; 7] = [
        DataSource::DatabaseValues,
        DataSource::Facilities,
        DataSource::Metrics,
        DataSource::Alerts,
        DataSource::Energy,
        DataSource::Quality,
        DataSource::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::DatabaseValues => "database_values",
            DataSource::Facilities => "facilities",
            DataSource::Metrics => "metrics",
            DataSource::Alerts => "alerts",
            DataSource::Energy => "energy",
            DataSource::Quality => "quality",
            DataSource::Maintenance => "maintenance",
        }
    }
}

macro_rules! catalog_enum_text {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = WidgetError;

            fn from_str(s: &str) -> Result<Self> {
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| WidgetError::Config(format!("unknown {}: {}", $what, s)))
            }
        }
    };
}

catalog_enum_text!(WidgetType, "widget type");
catalog_enum_text!(ChartType, "chart type");
catalog_enum_text!(DisplayMode, "display mode");
catalog_enum_text!(DataSource, "data source");

/// Display mode entry as presented by the mode picker
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ModeSpec {
    pub mode: DisplayMode,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    pub chart_type: ChartType,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DataSourceSpec {
    pub source: DataSource,
    pub label: &'static str,
    pub description: &'static str,
}

const fn mode(mode: DisplayMode, label: &'static str, description: &'static str) -> ModeSpec {
    ModeSpec {
        mode,
        label,
        description,
    }
}

const KPI_MODES: &[ModeSpec] = &[
    mode(DisplayMode::Single, "Single Value", "Display one metric value"),
    mode(DisplayMode::Multiple, "Multiple Values", "Display multiple metrics"),
];

const CHART_MODES: &[ModeSpec] = &[
    mode(DisplayMode::Single, "Single Series", "One data series over time"),
    mode(DisplayMode::Multiple, "Multiple Series", "Multiple data series"),
    mode(DisplayMode::XyChart, "X-Y Chart", "Two-axis correlation chart"),
    mode(DisplayMode::Trend, "Trend Analysis", "Time-based trend visualization"),
];

const GAUGE_MODES: &[ModeSpec] = &[
    mode(DisplayMode::Single, "Single Gauge", "One circular gauge"),
    mode(DisplayMode::Multiple, "Multiple Gauges", "Multiple gauge display"),
];

const NETWORK_MODES: &[ModeSpec] = &[
    mode(DisplayMode::Single, "Node View", "Individual node focus"),
    mode(DisplayMode::Multiple, "Network View", "Full network topology"),
];

const TABLE_MODES: &[ModeSpec] = &[
    mode(DisplayMode::Single, "Simple Table", "Basic data table"),
    mode(DisplayMode::Multiple, "Advanced Table", "Table with grouping/filtering"),
];

const CUSTOM_MODES: &[ModeSpec] = &[
    mode(DisplayMode::Single, "Single Display", "One custom visualization"),
    mode(DisplayMode::Multiple, "Multiple Display", "Multiple custom elements"),
];

const CHART_TYPES: &[ChartSpec] = &[
    ChartSpec {
        chart_type: ChartType::Line,
        label: "Line Chart",
        description: "Best for trends over time",
    },
    ChartSpec {
        chart_type: ChartType::Bar,
        label: "Bar Chart",
        description: "Compare categories",
    },
    ChartSpec {
        chart_type: ChartType::Area,
        label: "Area Chart",
        description: "Filled line chart for volumes",
    },
    ChartSpec {
        chart_type: ChartType::Pie,
        label: "Pie Chart",
        description: "Show parts of a whole",
    },
    ChartSpec {
        chart_type: ChartType::Donut,
        label: "Donut Chart",
        description: "Pie chart with center space",
    },
    ChartSpec {
        chart_type: ChartType::Scatter,
        label: "Scatter Plot",
        description: "Show correlation between variables",
    },
];

const DATA_SOURCES: &[DataSourceSpec] = &[
    DataSourceSpec {
        source: DataSource::DatabaseValues,
        label: "Database Values",
        description: "Tag values read from the plant database",
    },
    DataSourceSpec {
        source: DataSource::Facilities,
        label: "Facilities",
        description: "Facility records and their status",
    },
    DataSourceSpec {
        source: DataSource::Metrics,
        label: "Metrics",
        description: "Aggregated production metrics",
    },
    DataSourceSpec {
        source: DataSource::Alerts,
        label: "Alerts",
        description: "Active and recent alerts",
    },
    DataSourceSpec {
        source: DataSource::Energy,
        label: "Energy",
        description: "Energy consumption readings",
    },
    DataSourceSpec {
        source: DataSource::Quality,
        label: "Quality Control",
        description: "Water quality measurements",
    },
    DataSourceSpec {
        source: DataSource::Maintenance,
        label: "Maintenance",
        description: "Equipment maintenance records",
    },
];

/// Ordered display modes legal for a widget type. Never empty.
pub fn modes_for(widget_type: WidgetType) -> &'static [ModeSpec] {
    match widget_type {
        WidgetType::Kpi => KPI_MODES,
        WidgetType::Chart => CHART_MODES,
        WidgetType::Gauge => GAUGE_MODES,
        WidgetType::Network => NETWORK_MODES,
        WidgetType::Table => TABLE_MODES,
        WidgetType::Custom => CUSTOM_MODES,
    }
}

/// String-keyed lookup. Unrecognized keys get the `custom` entry.
pub fn modes_for_key(key: &str) -> &'static [ModeSpec] {
    key.parse::<WidgetType>()
        .map(modes_for)
        .unwrap_or(CUSTOM_MODES)
}

pub fn display_modes_for(widget_type: WidgetType) -> Vec<DisplayMode> {
    modes_for(widget_type).iter().map(|m| m.mode).collect()
}

/// First catalog entry; what a freshly created widget starts with.
pub fn default_mode(widget_type: WidgetType) -> DisplayMode {
    modes_for(widget_type)
        .first()
        .map(|m| m.mode)
        .unwrap_or(DisplayMode::Single)
}

pub fn find_mode(widget_type: WidgetType, mode: DisplayMode) -> Option<&'static ModeSpec> {
    modes_for(widget_type).iter().find(|m| m.mode == mode)
}

pub fn is_mode_allowed(widget_type: WidgetType, mode: DisplayMode) -> bool {
    find_mode(widget_type, mode).is_some()
}

/// Chart shapes are global, not per widget type.
pub fn chart_types() -> &'static [ChartSpec] {
    CHART_TYPES
}

pub fn chart_types_for() -> Vec<ChartType> {
    CHART_TYPES.iter().map(|c| c.chart_type).collect()
}

pub fn find_chart_type(chart_type: ChartType) -> Option<&'static ChartSpec> {
    CHART_TYPES.iter().find(|c| c.chart_type == chart_type)
}

pub fn data_sources() -> &'static [DataSourceSpec] {
    DATA_SOURCES
}

pub fn find_data_source(source: DataSource) -> Option<&'static DataSourceSpec> {
    DATA_SOURCES.iter().find(|d| d.source == source)
}

/// Help line shown under the mode picker
pub fn mode_hint(mode: DisplayMode) -> &'static str {
    match mode {
        DisplayMode::Single => "Monitor one primary value or metric",
        DisplayMode::Multiple => "Display several related values together",
        DisplayMode::XyChart => "Show relationship between two variables",
        DisplayMode::Trend => "Visualize data changes over time",
    }
}

/// How many fields the value picker lets a widget bind.
pub fn max_field_selections(widget_type: WidgetType) -> usize {
    match widget_type {
        WidgetType::Table => 10,
        WidgetType::Chart => 5,
        _ => 2,
    }
}
