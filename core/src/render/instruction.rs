// Render instructions
//
// Output contract handed to the presentation layer. One variant per widget
// type plus an in-band placeholder for anything that could not be drawn.

use crate::catalog::{ChartType, DisplayMode, WidgetType};
use crate::threshold::Threshold;
use crate::widget::WidgetDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderInstruction {
    Kpi(KpiInstruction),
    Chart(ChartInstruction),
    Gauge(GaugeInstruction),
    Network(NetworkInstruction),
    Table(TableInstruction),
    Custom(CustomInstruction),
    Placeholder(PlaceholderInstruction),
}

impl RenderInstruction {
    pub fn widget_id(&self) -> &str {
        match self {
            RenderInstruction::Kpi(i) => &i.widget_id,
            RenderInstruction::Chart(i) => &i.widget_id,
            RenderInstruction::Gauge(i) => &i.widget_id,
            RenderInstruction::Network(i) => &i.widget_id,
            RenderInstruction::Table(i) => &i.widget_id,
            RenderInstruction::Custom(i) => &i.widget_id,
            RenderInstruction::Placeholder(i) => &i.widget_id,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RenderInstruction::Placeholder(_))
    }

    pub fn as_placeholder(&self) -> Option<&PlaceholderInstruction> {
        match self {
            RenderInstruction::Placeholder(p) => Some(p),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn between(previous: f64, current: f64) -> Self {
        if current > previous {
            Trend::Up
        } else if current < previous {
            Trend::Down
        } else {
            Trend::Flat
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KpiTile {
    pub label: String,
    pub value: f64,
    pub unit: Option<String>,
    pub previous: Option<f64>,
    pub trend: Trend,
    /// Change against `previous` in percent; absent when there is no
    /// previous reading or it was zero
    pub change_percent: Option<f64>,
    pub sparkline: Vec<f64>,
    pub band: Option<Threshold>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KpiInstruction {
    pub widget_id: String,
    pub title: String,
    pub mode: DisplayMode,
    pub tiles: Vec<KpiTile>,
    /// Severity strip, ascending
    pub thresholds: Vec<Threshold>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<ChartPoint>,
    /// Computed from other series (trend line) rather than read from data
    #[serde(default)]
    pub derived: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub fraction: f64,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum ChartBody {
    Cartesian {
        x_field: Option<String>,
        y_field: String,
        series: Vec<Series>,
    },
    Radial {
        hole_ratio: f64,
        slices: Vec<Slice>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartInstruction {
    pub widget_id: String,
    pub title: String,
    pub chart_type: ChartType,
    pub mode: DisplayMode,
    pub body: ChartBody,
    pub thresholds: Vec<Threshold>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GaugeDial {
    pub label: String,
    /// Raw reading; absent when the record had no numeric value
    pub value: Option<f64>,
    /// Reading normalized onto the gauge scale, clamped to [0, 100]
    pub percent: f64,
    pub sweep_degrees: f64,
    pub arc_length: f64,
    pub color: String,
    pub band: Option<Threshold>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GaugeInstruction {
    pub widget_id: String,
    pub title: String,
    pub mode: DisplayMode,
    pub radius: f64,
    pub circumference: f64,
    pub dials: Vec<GaugeDial>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: String,
    pub label: String,
    pub value: Option<f64>,
    pub status: Option<String>,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEdge {
    pub from: String,
    pub to: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkInstruction {
    pub widget_id: String,
    pub title: String,
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// One cell per column, `null` where the record lacks the column
    pub cells: Vec<Value>,
    pub status: Option<Threshold>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RowGroup {
    pub key: String,
    /// Indices into `TableInstruction::rows`
    pub rows: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterFacet {
    pub column: String,
    pub values: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableGrouping {
    pub group_by: String,
    pub groups: Vec<RowGroup>,
    pub filters: Vec<FilterFacet>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableInstruction {
    pub widget_id: String,
    pub title: String,
    pub mode: DisplayMode,
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
    pub grouping: Option<TableGrouping>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustomInstruction {
    pub widget_id: String,
    pub title: String,
    pub renderer: String,
    pub payload: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum PlaceholderReason {
    NoData,
    UnboundField { fields: Vec<String> },
    NoRenderer { renderer: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderInstruction {
    pub widget_id: String,
    pub title: String,
    pub widget_type: WidgetType,
    pub reason: PlaceholderReason,
    pub message: String,
}

impl PlaceholderInstruction {
    pub fn new(descriptor: &WidgetDescriptor, reason: PlaceholderReason) -> Self {
        let message = match &reason {
            PlaceholderReason::NoData => "No data available".to_string(),
            PlaceholderReason::UnboundField { fields } => {
                format!("Field not bound: {}", fields.join(", "))
            }
            PlaceholderReason::NoRenderer { renderer } => {
                format!("No renderer registered for '{}'", renderer)
            }
        };
        Self {
            widget_id: descriptor.id().to_string(),
            title: descriptor.title().to_string(),
            widget_type: descriptor.widget_type(),
            reason,
            message,
        }
    }

    pub fn no_data(descriptor: &WidgetDescriptor) -> RenderInstruction {
        RenderInstruction::Placeholder(Self::new(descriptor, PlaceholderReason::NoData))
    }
}
