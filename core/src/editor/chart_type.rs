use super::traits::{Selector, SelectorOption};
use crate::catalog::{self, ChartType};
use crate::widget::ConfigPatch;

/// Picker over the global chart shape catalog
#[derive(Clone, Copy, Debug, Default)]
pub struct ChartTypeSelector;

impl Selector for ChartTypeSelector {
    type Context = ();
    type Value = ChartType;

    fn name(&self) -> &'static str {
        "chart_type"
    }

    fn options(&self, _context: &()) -> Vec<SelectorOption<ChartType>> {
        catalog::chart_types()
            .iter()
            .map(|c| SelectorOption::new(c.chart_type, c.label, c.description))
            .collect()
    }

    fn fragment(&self, value: ChartType) -> ConfigPatch {
        ConfigPatch {
            chart_type: Some(value),
            ..Default::default()
        }
    }
}
