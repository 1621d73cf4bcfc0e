// ABOUTME: Daily activity summary row as returned by the provider's getactivity action
// ABOUTME: Fields are optional and carried verbatim; completeness is the exporter's concern

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One day of activity, in provider wire order
///
/// Fields are passed through untouched whatever their JSON type: `100`
/// stays `100`, `93.52` stays `93.52`, `"n/a"` stays `n/a`. Absent or
/// `null` fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityRow {
    /// Day, normally `yyyy-mm-dd`
    #[serde(default)]
    pub date: Option<Value>,
    /// Step count
    #[serde(default)]
    pub steps: Option<Value>,
    /// Active calories
    #[serde(default)]
    pub calories: Option<Value>,
    /// Elevation climbed, in meters
    #[serde(default)]
    pub elevation: Option<Value>,
}

impl ActivityRow {
    /// The four exported fields as text, in column order
    #[must_use]
    pub fn fields(&self) -> [Option<Cow<'_, str>>; 4] {
        [
            self.date.as_ref().map(value_text),
            self.steps.as_ref().map(value_text),
            self.calories.as_ref().map(value_text),
            self.elevation.as_ref().map(value_text),
        ]
    }
}

/// Text of a JSON value: strings without quotes, anything else as JSON
#[must_use]
pub fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(text) => Cow::Borrowed(text),
        other => Cow::Owned(other.to_string()),
    }
}
