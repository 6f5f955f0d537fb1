//! The plain value a single property reduces to.

use serde::Serialize;
use serde_json::{Number, Value};

/// A property value after one level of reduction.
///
/// Serializes untagged, so a simplified map renders as ordinary JSON
/// (`Empty` becomes `null`).
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum SimpleValue {
    /// Missing, null, malformed or unknown.
    #[default]
    Empty,
    Text(String),
    Number(Number),
    Bool(bool),
    /// Ordered values from list-shaped properties and rollup aggregates.
    List(Vec<SimpleValue>),
    /// Untouched payload for shapes with no scalar reading (a verification
    /// object without a `state`).
    Raw(Value),
}

impl SimpleValue {
    pub fn text(value: impl Into<String>) -> Self {
        SimpleValue::Text(value.into())
    }

    /// Wraps an optional string, mapping `None` to [`SimpleValue::Empty`].
    pub fn from_opt_text(value: Option<&str>) -> Self {
        value.map_or(SimpleValue::Empty, SimpleValue::text)
    }

    /// A list of strings.
    pub fn texts<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SimpleValue::List(values.into_iter().map(SimpleValue::text).collect())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SimpleValue::Empty)
    }

    /// Empty, or a string with nothing in it. Rollups drop these.
    pub fn is_blank(&self) -> bool {
        match self {
            SimpleValue::Empty => true,
            SimpleValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SimpleValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SimpleValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SimpleValue]> {
        match self {
            SimpleValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Human-readable rendering used when a text field receives a non-text
    /// value: numbers and booleans are formatted, lists are joined with
    /// `", "`, empty becomes `None`.
    pub fn display_text(&self) -> Option<String> {
        match self {
            SimpleValue::Empty => None,
            SimpleValue::Text(s) => Some(s.clone()),
            SimpleValue::Number(n) => Some(n.to_string()),
            SimpleValue::Bool(b) => Some(b.to_string()),
            SimpleValue::List(items) => {
                let parts: Vec<String> = items.iter().filter_map(SimpleValue::display_text).collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(", "))
                }
            }
            SimpleValue::Raw(value) => match value {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            },
        }
    }

    /// Converts back into JSON, for logging and the CLI dump.
    pub fn to_json(&self) -> Value {
        match self {
            SimpleValue::Empty => Value::Null,
            SimpleValue::Text(s) => Value::String(s.clone()),
            SimpleValue::Number(n) => Value::Number(n.clone()),
            SimpleValue::Bool(b) => Value::Bool(*b),
            SimpleValue::List(items) => Value::Array(items.iter().map(SimpleValue::to_json).collect()),
            SimpleValue::Raw(value) => value.clone(),
        }
    }
}

impl From<&str> for SimpleValue {
    fn from(value: &str) -> Self {
        SimpleValue::text(value)
    }
}

impl From<String> for SimpleValue {
    fn from(value: String) -> Self {
        SimpleValue::Text(value)
    }
}

impl From<bool> for SimpleValue {
    fn from(value: bool) -> Self {
        SimpleValue::Bool(value)
    }
}

impl From<Number> for SimpleValue {
    fn from(value: Number) -> Self {
        SimpleValue::Number(value)
    }
}
