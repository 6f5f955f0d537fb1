//! Best-effort lookup of a property when the exact canonical key is unknown.
//!
//! Legacy databases carry columns like `"Papel Hidrossensível (foto)"` whose
//! identifier drifted between schema edits. Callers match a pattern instead of
//! binding a key.

use canonical::{normalize, NormalizeMode};
use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};
use tracing::warn;

use crate::extract::simplify_value;
use crate::map::normalize_properties;
use crate::value::SimpleValue;

/// Finds the first raw property whose key matches `pattern`.
///
/// The pattern is compiled case-insensitively and searched (not anchored)
/// against, in order:
///
/// 1. the canonical identifiers (`nome_do_piloto`), first match wins;
/// 2. each raw key under flexible normalization (`nomedopiloto` for
///    `"Nome-do-Piloto"`), first match wins.
///
/// An invalid pattern is logged and treated as no match. The returned value
/// is the raw, unreduced property.
pub fn find_property<'a>(raw: &'a Map<String, Value>, pattern: &str) -> Option<&'a Value> {
    if raw.is_empty() || pattern.is_empty() {
        return None;
    }
    let re = compile(pattern)?;

    let by_identifier = normalize_properties(raw)
        .into_iter()
        .find(|(ident, _)| re.is_match(ident))
        .map(|(_, (_, value))| value);
    if by_identifier.is_some() {
        return by_identifier;
    }

    raw.iter()
        .find(|(key, _)| re.is_match(&normalize(key, NormalizeMode::Flexible)))
        .map(|(_, value)| value)
}

/// [`find_property`] followed by simplification. Missing becomes
/// [`SimpleValue::Empty`].
pub fn find_simplified(raw: &Map<String, Value>, pattern: &str) -> SimpleValue {
    find_property(raw, pattern).map_or(SimpleValue::Empty, simplify_value)
}

fn compile(pattern: &str) -> Option<Regex> {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(err) => {
            warn!(pattern, error = %err, "invalid property lookup pattern");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn sample() -> Map<String, Value> {
        match json!({
            "Papel Hidrossensível": {"type": "files", "files": [
                {"type": "external", "external": {"url": "https://cdn/x.jpg"}}
            ]},
            "RPM/Tipo-de gota": {"type": "select", "select": {"name": "Fina"}},
            "Temperatura (°C)": {"type": "number", "number": 28}
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn matches_identifier_case_insensitively() {
        let raw = sample();
        let found = find_property(&raw, "PAPEL.*HIDRO").expect("match");
        assert_eq!(found["type"], "files");
    }

    #[test]
    fn falls_back_to_flexible_raw_keys() {
        let raw = sample();
        // Identifier is `rpm_tipo_de_gota`; only the flexible form joins the words.
        let found = find_property(&raw, "rpmtipode").expect("match");
        assert_eq!(found["select"]["name"], "Fina");
    }

    #[test]
    fn simplified_convenience() {
        let raw = sample();
        assert_eq!(find_simplified(&raw, "^temperatura"), SimpleValue::Number(serde_json::Number::from(28)));
        assert_eq!(
            find_simplified(&raw, "hidro"),
            SimpleValue::texts(["https://cdn/x.jpg"])
        );
        assert_eq!(find_simplified(&raw, "inexistente"), SimpleValue::Empty);
    }

    #[test]
    fn invalid_or_empty_inputs_are_no_match() {
        let raw = sample();
        assert!(find_property(&raw, "(unclosed").is_none());
        assert!(find_property(&raw, "").is_none());
        assert!(find_property(&Map::new(), "papel").is_none());
    }

    #[test]
    fn first_match_in_iteration_order() {
        let raw = match json!({
            "Foto Clima": {"type": "url", "url": "https://a"},
            "Foto Produtos": {"type": "url", "url": "https://b"}
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        assert_eq!(find_simplified(&raw, "^foto"), SimpleValue::text("https://a"));
    }
}
