use crate::widget::ConfigPatch;
use crate::{Result, WidgetError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error};

/// One choice offered by an editor, carrying everything a picker displays
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectorOption<T> {
    pub id: T,
    pub label: String,
    pub description: String,
}

impl<T> SelectorOption<T> {
    pub fn new(id: T, label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            description: description.into(),
        }
    }
}

/// The core trait for catalog-backed pickers
pub trait Selector {
    /// What the legal choices depend on (`()` for global catalogs)
    type Context;
    type Value: Copy + PartialEq + fmt::Display + FromStr<Err = WidgetError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Legal choices for `context`, in catalog order
    fn options(&self, context: &Self::Context) -> Vec<SelectorOption<Self::Value>>;

    /// Config fragment for a value already known to be legal
    fn fragment(&self, value: Self::Value) -> ConfigPatch;

    /// Select `value`. A value the catalog does not offer for `context` is a
    /// caller bug and comes back as `WidgetError::Config`.
    fn select(&self, context: &Self::Context, value: Self::Value) -> Result<ConfigPatch> {
        if self.options(context).iter().any(|o| o.id == value) {
            debug!(target: "editor", selector = self.name(), value = %value, "Selected option");
            Ok(self.fragment(value))
        } else {
            error!(target: "editor", selector = self.name(), value = %value, "Selection outside catalog");
            Err(WidgetError::Config(format!(
                "{} offers no option '{}'",
                self.name(),
                value
            )))
        }
    }

    /// Select by wire id, as sent back by a presentation layer
    fn select_id(&self, context: &Self::Context, id: &str) -> Result<ConfigPatch> {
        let value = id.parse::<Self::Value>()?;
        self.select(context, value)
    }
}
