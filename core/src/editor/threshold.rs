use super::traits::{Selector, SelectorOption};
use crate::threshold::{
    ColorToken, Threshold, ThresholdPatch, ThresholdPreset, ThresholdSet,
    DEFAULT_THRESHOLD_COLOR, PALETTE,
};
use crate::widget::{ConfigPatch, WidgetDescriptor};
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The "new threshold" form
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdDraft {
    pub value: f64,
    pub color: ColorToken,
    pub label: String,
}

impl Default for ThresholdDraft {
    fn default() -> Self {
        Self {
            value: 0.0,
            color: DEFAULT_THRESHOLD_COLOR.to_string(),
            label: String::new(),
        }
    }
}

impl ThresholdDraft {
    /// The add button stays disabled until a label is typed.
    pub fn can_submit(&self) -> bool {
        !self.label.trim().is_empty()
    }

    pub fn to_threshold(&self) -> Threshold {
        Threshold::new(self.value, self.color.clone(), self.label.clone())
    }
}

/// Edits the threshold set of a widget.
///
/// Every operation takes the current set and returns a config fragment with
/// the next set; failures leave the caller's set as it was.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThresholdEditor;

impl ThresholdEditor {
    /// Current set of a descriptor (empty when none is configured)
    pub fn current(descriptor: &WidgetDescriptor) -> ThresholdSet {
        descriptor.config().thresholds.clone().unwrap_or_default()
    }

    pub fn add(&self, current: &ThresholdSet, candidate: Threshold) -> Result<ConfigPatch> {
        let next = current.add(candidate)?;
        debug!(target: "editor", selector = "threshold", len = next.len(), "Added threshold");
        Ok(Self::patch(next))
    }

    /// Submit the draft form; on success the form resets to its defaults.
    pub fn submit(
        &self,
        current: &ThresholdSet,
        draft: &ThresholdDraft,
    ) -> Result<(ConfigPatch, ThresholdDraft)> {
        let patch = self.add(current, draft.to_threshold())?;
        Ok((patch, ThresholdDraft::default()))
    }

    pub fn remove(&self, current: &ThresholdSet, index: usize) -> Result<ConfigPatch> {
        let next = current.remove(index)?;
        debug!(target: "editor", selector = "threshold", index, "Removed threshold");
        Ok(Self::patch(next))
    }

    pub fn update(
        &self,
        current: &ThresholdSet,
        index: usize,
        patch: ThresholdPatch,
    ) -> Result<ConfigPatch> {
        let next = current.update(index, patch)?;
        Ok(Self::patch(next))
    }

    pub fn apply_preset(&self, name: &str) -> Result<ConfigPatch> {
        self.select_id(&(), name)
    }

    /// Colour picker entries
    pub fn colors(&self) -> Vec<SelectorOption<ColorToken>> {
        PALETTE
            .iter()
            .map(|c| SelectorOption::new(c.value.to_string(), c.name, c.value))
            .collect()
    }

    fn patch(thresholds: ThresholdSet) -> ConfigPatch {
        ConfigPatch {
            thresholds: Some(thresholds),
            ..Default::default()
        }
    }
}

impl Selector for ThresholdEditor {
    type Context = ();
    type Value = ThresholdPreset;

    fn name(&self) -> &'static str {
        "threshold_preset"
    }

    fn options(&self, _context: &()) -> Vec<SelectorOption<ThresholdPreset>> {
        ThresholdPreset::ALL
            .iter()
            .map(|p| {
                let description = match p {
                    ThresholdPreset::Standard => "Good / Warning / Critical at 80, 60, 40",
                    ThresholdPreset::Performance => {
                        "Excellent / Good / Poor / Critical at 90, 70, 50, 30"
                    }
                    ThresholdPreset::Clear => "Remove all thresholds",
                };
                SelectorOption::new(*p, p.label(), description)
            })
            .collect()
    }

    fn fragment(&self, value: ThresholdPreset) -> ConfigPatch {
        Self::patch(value.thresholds())
    }
}
