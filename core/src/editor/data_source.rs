use super::traits::{Selector, SelectorOption};
use crate::catalog::{self, DataSource};
use crate::widget::ConfigPatch;

/// Picker over the global data source catalog
#[derive(Clone, Copy, Debug, Default)]
pub struct DataSourceSelector;

impl Selector for DataSourceSelector {
    type Context = ();
    type Value = DataSource;

    fn name(&self) -> &'static str {
        "data_source"
    }

    fn options(&self, _context: &()) -> Vec<SelectorOption<DataSource>> {
        catalog::data_sources()
            .iter()
            .map(|d| SelectorOption::new(d.source, d.label, d.description))
            .collect()
    }

    fn fragment(&self, value: DataSource) -> ConfigPatch {
        ConfigPatch {
            data_source: Some(value),
            ..Default::default()
        }
    }
}
