//! Whole-map simplification: canonical keys in, plain values out.

use std::time::Instant;

use canonical::to_identifier;
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, Level};

use crate::extract::simplify_value;
use crate::value::SimpleValue;

static EMPTY: SimpleValue = SimpleValue::Empty;

/// Canonical identifier → (original key, raw value).
///
/// Keys that normalize to nothing are skipped. When two raw keys share a
/// canonical identifier the first one in iteration order wins.
pub fn normalize_properties(raw: &Map<String, Value>) -> IndexMap<String, (&str, &Value)> {
    let mut out = IndexMap::with_capacity(raw.len());
    for (key, value) in raw {
        let ident = to_identifier(key);
        if ident.is_empty() {
            debug!(key = %key, "property key normalizes to nothing, skipped");
            continue;
        }
        match out.entry(ident) {
            Entry::Vacant(slot) => {
                slot.insert((key.as_str(), value));
            }
            Entry::Occupied(existing) => {
                debug!(
                    key = %key,
                    kept = %existing.get().0,
                    canonical = %existing.key(),
                    "duplicate canonical key, keeping first"
                );
            }
        }
    }
    out
}

/// Simplifies every property of a raw Notion property map.
///
/// The input is never modified. Output length is at most the input length.
pub fn simplify_map(raw: &Map<String, Value>) -> SimplifiedMap {
    let start = Instant::now();
    let span = tracing::span!(Level::DEBUG, "ingest.simplify_map", properties = raw.len());
    let _guard = span.enter();

    let entries: IndexMap<String, SimpleValue> = normalize_properties(raw)
        .into_iter()
        .map(|(ident, (_, value))| (ident, simplify_value(value)))
        .collect();

    let elapsed_micros = start.elapsed().as_micros();
    debug!(
        input = raw.len(),
        output = entries.len(),
        elapsed_micros,
        "simplify_map_done"
    );
    SimplifiedMap(entries)
}

/// Canonical identifier → simplified value, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SimplifiedMap(IndexMap<String, SimpleValue>);

impl SimplifiedMap {
    /// Value stored under `key`, or [`SimpleValue::Empty`] when absent.
    pub fn get(&self, key: &str) -> &SimpleValue {
        self.0.get(key).unwrap_or(&EMPTY)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Text rendering of the value. Lists are joined with `", "`; blank
    /// strings count as missing.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).display_text().filter(|s| !s.trim().is_empty())
    }

    /// Numeric reading. Accepts numbers and numeric strings, with either `.`
    /// or `,` as decimal separator.
    pub fn number(&self, key: &str) -> Option<f64> {
        number_of(self.get(key))
    }

    /// Elements of a list value as text. A scalar becomes a one-element list.
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            SimpleValue::List(items) => items.iter().filter_map(SimpleValue::display_text).collect(),
            other => other.display_text().into_iter().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SimpleValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// JSON object form, used by the CLI dump.
    pub fn to_json(&self) -> Value {
        Value::Object(self.0.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
    }
}

impl FromIterator<(String, SimpleValue)> for SimplifiedMap {
    fn from_iter<I: IntoIterator<Item = (String, SimpleValue)>>(iter: I) -> Self {
        let mut map = IndexMap::new();
        for (key, value) in iter {
            map.entry(key).or_insert(value);
        }
        SimplifiedMap(map)
    }
}

/// Reads a number from a simplified value, parsing numeric strings.
pub fn number_of(value: &SimpleValue) -> Option<f64> {
    match value {
        SimpleValue::Number(n) => n.as_f64(),
        SimpleValue::Text(s) => parse_decimal(s),
        SimpleValue::List(items) => items.first().and_then(number_of),
        _ => None,
    }
}

fn parse_decimal(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}
