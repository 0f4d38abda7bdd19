use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Caller-supplied parameter values, keyed by parameter name.
///
/// A sorted map, so serializing it always yields the same bytes regardless
/// of the order the caller inserted the values in.
pub type ParameterValues = BTreeMap<String, serde_json::Value>;

/// An input a report template accepts at generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Parameter {
    pub name: String,
    pub label: String,
    pub kind: ParameterKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Allowed values for `single_select` and `multi_select`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Parameter {
    pub fn new(name: &str, label: &str, kind: ParameterKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            default: None,
            options: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: serde_json::Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|o| o.to_string()).collect();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ParameterKind {
    /// A single calendar date, `YYYY-MM-DD`.
    Date,
    /// An object with `start` and `end` dates.
    DateRange,
    SingleSelect,
    MultiSelect,
    Number,
    FreeText,
    Boolean,
}
