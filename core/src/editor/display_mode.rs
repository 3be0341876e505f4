use super::traits::{Selector, SelectorOption};
use crate::catalog::{self, DisplayMode, WidgetType};
use crate::widget::ConfigPatch;

/// Picker over the display modes a widget type allows
#[derive(Clone, Copy, Debug, Default)]
pub struct DisplayModeSelector;

impl DisplayModeSelector {
    /// Help line for the currently selected mode
    pub fn hint(&self, mode: DisplayMode) -> &'static str {
        catalog::mode_hint(mode)
    }
}

impl Selector for DisplayModeSelector {
    type Context = WidgetType;
    type Value = DisplayMode;

    fn name(&self) -> &'static str {
        "display_mode"
    }

    fn options(&self, widget_type: &WidgetType) -> Vec<SelectorOption<DisplayMode>> {
        catalog::modes_for(*widget_type)
            .iter()
            .map(|m| SelectorOption::new(m.mode, m.label, m.description))
            .collect()
    }

    fn fragment(&self, value: DisplayMode) -> ConfigPatch {
        ConfigPatch {
            display_mode: Some(value),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_offers_simple_and_advanced() {
        let options = DisplayModeSelector.options(&WidgetType::Table);
        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Simple Table", "Advanced Table"]);
    }

    #[test]
    fn xy_chart_rejected_outside_chart() {
        let err = DisplayModeSelector
            .select(&WidgetType::Gauge, DisplayMode::XyChart)
            .unwrap_err();
        assert!(err.is_contract_violation());
        assert!(DisplayModeSelector
            .select(&WidgetType::Chart, DisplayMode::XyChart)
            .is_ok());
    }

    #[test]
    fn hint_text() {
        assert_eq!(
            DisplayModeSelector.hint(DisplayMode::Trend),
            "Visualize data changes over time"
        );
    }
}
