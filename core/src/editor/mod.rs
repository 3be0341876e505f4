pub mod chart_type;
pub mod data_source;
pub mod display_mode;
pub mod threshold;
pub mod traits;

// Re-export common types
pub use chart_type::ChartTypeSelector;
pub use data_source::DataSourceSelector;
pub use display_mode::DisplayModeSelector;
pub use threshold::{ThresholdDraft, ThresholdEditor};
pub use traits::{Selector, SelectorOption};

use crate::widget::WidgetDescriptor;
use crate::Result;

/// Run a selection against a descriptor and return the updated descriptor.
pub fn apply_selection<S: Selector>(
    selector: &S,
    context: &S::Context,
    descriptor: &WidgetDescriptor,
    value: S::Value,
) -> Result<WidgetDescriptor> {
    let patch = selector.select(context, value)?;
    descriptor.apply(patch)
}
