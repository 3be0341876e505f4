// Widget descriptor
//
// Serializable description of one dashboard widget. Every constructor and
// every mutation path validates against the capability catalog, so a
// descriptor value in hand always satisfies its invariants.

use crate::catalog::{self, ChartType, DataSource, DisplayMode, WidgetType};
use crate::threshold::ThresholdSet;
use crate::{Result, WidgetError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::error;

/// Data binding and presentation choices of a widget
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<DataSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_mode: Option<DisplayMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<ThresholdSet>,
    /// Name of the external renderer a custom widget delegates to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renderer: Option<String>,
}

impl WidgetConfig {
    /// Mode in effect: the configured one, else the catalog default.
    pub fn effective_mode(&self, widget_type: WidgetType) -> DisplayMode {
        self.display_mode
            .unwrap_or_else(|| catalog::default_mode(widget_type))
    }

    pub fn thresholds(&self) -> Option<&ThresholdSet> {
        self.thresholds.as_ref().filter(|t| !t.is_empty())
    }
}

/// Config fragment produced by an editor selection.
///
/// `None` leaves a field alone. For the field bindings, an empty string
/// unbinds the field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<DataSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_mode: Option<DisplayMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<ThresholdSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renderer: Option<String>,
}

impl ConfigPatch {
    pub fn is_empty(&self) -> bool {
        *self == ConfigPatch::default()
    }

    /// Combine two fragments; fields set in `other` win.
    pub fn merge(self, other: ConfigPatch) -> ConfigPatch {
        ConfigPatch {
            data_source: other.data_source.or(self.data_source),
            value_field: other.value_field.or(self.value_field),
            x_axis_field: other.x_axis_field.or(self.x_axis_field),
            y_axis_field: other.y_axis_field.or(self.y_axis_field),
            chart_type: other.chart_type.or(self.chart_type),
            display_mode: other.display_mode.or(self.display_mode),
            thresholds: other.thresholds.or(self.thresholds),
            renderer: other.renderer.or(self.renderer),
        }
    }

    fn apply_to(self, config: &mut WidgetConfig) {
        fn bind(slot: &mut Option<String>, value: Option<String>) {
            if let Some(v) = value {
                *slot = if v.trim().is_empty() { None } else { Some(v) };
            }
        }

        if let Some(v) = self.data_source {
            config.data_source = Some(v);
        }
        bind(&mut config.value_field, self.value_field);
        bind(&mut config.x_axis_field, self.x_axis_field);
        bind(&mut config.y_axis_field, self.y_axis_field);
        bind(&mut config.renderer, self.renderer);
        if let Some(v) = self.chart_type {
            config.chart_type = Some(v);
        }
        if let Some(v) = self.display_mode {
            config.display_mode = Some(v);
        }
        if let Some(v) = self.thresholds {
            config.thresholds = Some(v);
        }
    }
}

/// Wire shape of a descriptor, before validation
#[derive(Deserialize)]
struct DescriptorRepr {
    id: String,
    #[serde(rename = "type")]
    widget_type: WidgetType,
    #[serde(default)]
    title: String,
    #[serde(default)]
    config: WidgetConfig,
    #[serde(default)]
    data: Option<Vec<Value>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DescriptorRepr")]
pub struct WidgetDescriptor {
    id: String,
    #[serde(rename = "type")]
    widget_type: WidgetType,
    title: String,
    config: WidgetConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Vec<Value>>,
}

impl TryFrom<DescriptorRepr> for WidgetDescriptor {
    type Error = WidgetError;

    fn try_from(repr: DescriptorRepr) -> Result<Self> {
        let descriptor = WidgetDescriptor {
            id: repr.id,
            widget_type: repr.widget_type,
            title: repr.title,
            config: repr.config,
            data: repr.data,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }
}

impl WidgetDescriptor {
    /// Fresh widget with the catalog's first display mode.
    pub fn new(
        id: impl Into<String>,
        widget_type: WidgetType,
        title: impl Into<String>,
    ) -> Result<Self> {
        Self::with_config(
            id,
            widget_type,
            title,
            WidgetConfig {
                display_mode: Some(catalog::default_mode(widget_type)),
                ..Default::default()
            },
        )
    }

    pub fn with_config(
        id: impl Into<String>,
        widget_type: WidgetType,
        title: impl Into<String>,
        config: WidgetConfig,
    ) -> Result<Self> {
        let descriptor = WidgetDescriptor {
            id: id.into(),
            widget_type,
            title: title.into(),
            config,
            data: None,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Parse and validate. Unknown widget types and catalog-incompatible
    /// settings are rejected here, never at render time.
    pub fn from_json(json: &str) -> Result<Self> {
        let repr: DescriptorRepr = serde_json::from_str(json)?;
        Self::try_from(repr)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let repr: DescriptorRepr = serde_json::from_value(value)?;
        Self::try_from(repr)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn widget_type(&self) -> WidgetType {
        self.widget_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn data(&self) -> Option<&[Value]> {
        self.data.as_deref()
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.config.effective_mode(self.widget_type)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Attach resolved records. Data never affects validity.
    pub fn with_data(mut self, data: Vec<Value>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn without_data(mut self) -> Self {
        self.data = None;
        self
    }

    /// Apply an editor fragment, returning a new validated descriptor.
    /// On error `self` is unchanged and nothing partial escapes.
    pub fn apply(&self, patch: ConfigPatch) -> Result<WidgetDescriptor> {
        let mut next = self.clone();
        patch.apply_to(&mut next.config);
        if let Err(e) = next.validate() {
            if e.is_contract_violation() {
                error!(target: "widget", widget = %self.id, error = %e, "Rejected catalog-incompatible config");
            }
            return Err(e);
        }
        Ok(next)
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(WidgetError::Validation("widget id is empty".to_string()));
        }

        if let Some(chart_type) = self.config.chart_type {
            if !self.widget_type.supports_chart_type() {
                return Err(WidgetError::Config(format!(
                    "chart type '{}' set on a {} widget",
                    chart_type, self.widget_type
                )));
            }
        }

        if let Some(mode) = self.config.display_mode {
            if !catalog::is_mode_allowed(self.widget_type, mode) {
                return Err(WidgetError::Config(format!(
                    "display mode '{}' is not available for {} widgets",
                    mode, self.widget_type
                )));
            }
        }

        if self.config.renderer.is_some() && self.widget_type != WidgetType::Custom {
            return Err(WidgetError::Config(format!(
                "external renderer set on a {} widget",
                self.widget_type
            )));
        }

        if let Some(thresholds) = &self.config.thresholds {
            for threshold in thresholds {
                threshold.check()?;
            }
        }

        Ok(())
    }
}

/// Widget ids must be unique within one board.
pub fn check_unique_ids(widgets: &[WidgetDescriptor]) -> Result<()> {
    let mut seen = HashSet::new();
    for w in widgets {
        if !seen.insert(w.id()) {
            return Err(WidgetError::Validation(format!(
                "duplicate widget id: {}",
                w.id()
            )));
        }
    }
    Ok(())
}
