// Threshold model
//
// Severity bands for a metric. A set is always stored ascending by value;
// every mutation returns a new, re-sorted set and leaves the old one intact.

use crate::{Result, WidgetError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hex colour string such as `#00ff88`
pub type ColorToken = String;

pub const DEFAULT_THRESHOLD_COLOR: &str = "#00ff88";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PaletteColor {
    pub name: &'static str,
    pub value: &'static str,
}

/// Colours offered by the threshold colour picker
pub const PALETTE: &[PaletteColor] = &[
    PaletteColor { name: "Green", value: "#00ff88" },
    PaletteColor { name: "Yellow", value: "#ffaa00" },
    PaletteColor { name: "Red", value: "#ff4444" },
    PaletteColor { name: "Blue", value: "#00ffff" },
    PaletteColor { name: "Purple", value: "#8000ff" },
    PaletteColor { name: "Orange", value: "#ff8000" },
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub value: f64,
    pub color: ColorToken,
    pub label: String,
}

impl Threshold {
    pub fn new(value: f64, color: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value,
            color: color.into(),
            label: label.into(),
        }
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.label.trim().is_empty() {
            return Err(WidgetError::Validation("missing label".to_string()));
        }
        if !self.value.is_finite() {
            return Err(WidgetError::Validation(format!(
                "threshold '{}' has a non-finite value",
                self.label
            )));
        }
        Ok(())
    }
}

/// Partial update applied by [`ThresholdSet::update`]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ThresholdPatch {
    pub fn value(value: f64) -> Self {
        Self {
            value: Some(value),
            ..Default::default()
        }
    }

    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Default::default()
        }
    }

    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    fn apply_to(self, threshold: &mut Threshold) {
        if let Some(v) = self.value {
            threshold.value = v;
        }
        if let Some(c) = self.color {
            threshold.color = c;
        }
        if let Some(l) = self.label {
            threshold.label = l;
        }
    }
}

/// Thresholds in ascending value order. Equal values keep insertion order.
///
/// Deserializing normalizes the order, so a set read from JSON obeys the same
/// invariant as one built through [`ThresholdSet::add`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Threshold>", into = "Vec<Threshold>")]
pub struct ThresholdSet {
    entries: Vec<Threshold>,
}

impl From<Vec<Threshold>> for ThresholdSet {
    fn from(entries: Vec<Threshold>) -> Self {
        let mut set = Self { entries };
        set.normalize();
        set
    }
}

impl From<ThresholdSet> for Vec<Threshold> {
    fn from(set: ThresholdSet) -> Self {
        set.entries
    }
}

impl ThresholdSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Threshold> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Threshold> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Threshold] {
        &self.entries
    }

    /// Append `candidate` and re-sort. An empty label is rejected and the set
    /// is returned untouched to the caller through the error path.
    pub fn add(&self, candidate: Threshold) -> Result<ThresholdSet> {
        candidate.check()?;
        let mut next = self.clone();
        next.entries.push(candidate);
        next.normalize();
        Ok(next)
    }

    pub fn remove(&self, index: usize) -> Result<ThresholdSet> {
        self.bounds(index)?;
        let mut next = self.clone();
        next.entries.remove(index);
        Ok(next)
    }

    /// Patch the entry at `index`, then re-sort the whole set, so a value
    /// change can move the edited entry.
    pub fn update(&self, index: usize, patch: ThresholdPatch) -> Result<ThresholdSet> {
        self.bounds(index)?;
        let mut edited = self.entries[index].clone();
        patch.apply_to(&mut edited);
        edited.check()?;

        let mut next = self.clone();
        next.entries[index] = edited;
        next.normalize();
        Ok(next)
    }

    /// Band a reading falls into: the highest threshold at or below `value`.
    /// Readings under every threshold belong to the lowest band.
    pub fn band_for(&self, value: f64) -> Option<&Threshold> {
        if value.is_nan() {
            return None;
        }
        self.entries
            .iter()
            .rev()
            .find(|t| t.value <= value)
            .or_else(|| self.entries.first())
    }

    /// Best-first view used by preview bars. Storage order is unaffected.
    pub fn display_order(&self) -> Vec<&Threshold> {
        self.entries.iter().rev().collect()
    }

    fn bounds(&self, index: usize) -> Result<()> {
        if index >= self.entries.len() {
            return Err(WidgetError::Index {
                index,
                len: self.entries.len(),
            });
        }
        Ok(())
    }

    fn normalize(&mut self) {
        // sort_by is stable: ties keep insertion order
        self.entries.sort_by(|a, b| a.value.total_cmp(&b.value));
    }
}

impl<'a> IntoIterator for &'a ThresholdSet {
    type Item = &'a Threshold;
    type IntoIter = std::slice::Iter<'a, Threshold>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Built-in threshold sets behind the quick preset buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdPreset {
    Standard,
    Performance,
    Clear,
}

impl ThresholdPreset {
    pub const ALL: [ThresholdPreset; 3] = [
        ThresholdPreset::Standard,
        ThresholdPreset::Performance,
        ThresholdPreset::Clear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdPreset::Standard => "standard",
            ThresholdPreset::Performance => "performance",
            ThresholdPreset::Clear => "clear",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThresholdPreset::Standard => "Standard",
            ThresholdPreset::Performance => "Performance",
            ThresholdPreset::Clear => "Clear All",
        }
    }

    /// Entries as the preset lists them, best band first.
    pub fn display_entries(&self) -> Vec<Threshold> {
        match self {
            ThresholdPreset::Standard => vec![
                Threshold::new(80.0, "#00ff88", "Good"),
                Threshold::new(60.0, "#ffaa00", "Warning"),
                Threshold::new(40.0, "#ff4444", "Critical"),
            ],
            ThresholdPreset::Performance => vec![
                Threshold::new(90.0, "#00ff88", "Excellent"),
                Threshold::new(70.0, "#ffaa00", "Good"),
                Threshold::new(50.0, "#ff8000", "Poor"),
                Threshold::new(30.0, "#ff4444", "Critical"),
            ],
            ThresholdPreset::Clear => Vec::new(),
        }
    }

    /// The preset as a stored set (ascending).
    pub fn thresholds(&self) -> ThresholdSet {
        ThresholdSet::from(self.display_entries())
    }
}

impl fmt::Display for ThresholdPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThresholdPreset {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self> {
        ThresholdPreset::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| WidgetError::Config(format!("unknown threshold preset: {}", s)))
    }
}

/// Resolve a preset by name.
pub fn apply_preset(name: &str) -> Result<ThresholdSet> {
    Ok(name.parse::<ThresholdPreset>()?.thresholds())
}
