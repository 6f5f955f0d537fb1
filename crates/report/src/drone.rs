//! Splits the combined "model + fleet prefix" drone field.

use once_cell::sync::Lazy;
use regex::Regex;

static PS_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bps\b").expect("static regex"));
static TRAILING_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-–—]\s*$").expect("static regex"));
static LEADING_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-–—]").expect("static regex"));
static DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-–—]").expect("static regex"));
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("static regex"));
static PS_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^ps\d").expect("static regex"));

/// Splits `"DJI Agras T40 - PS 07"` into `("DJI Agras T40", Some("07"))`.
///
/// A standalone `PS` token (any case) divides model from prefix; the prefix
/// is the first digit run after it, or the whole remainder when it has no
/// digits. Without the token the value is split on dashes: an all-digit
/// part or a `ps<digits>` part supplies the prefix, everything else is the
/// model joined with `" - "`.
///
/// ```rust
/// use report::split_drone_model;
///
/// assert_eq!(split_drone_model("T40 PS 12"), ("T40".to_string(), Some("12".to_string())));
/// assert_eq!(split_drone_model("Agras T30 - 05"), ("Agras T30".to_string(), Some("05".to_string())));
/// ```
pub fn split_drone_model(value: &str) -> (String, Option<String>) {
    if let Some(token) = PS_TOKEN.find(value) {
        let left = value[..token.start()].trim();
        let right = value[token.end()..].trim();
        let left = TRAILING_DASH.replace(left, "");
        let left = left.trim();
        let right = LEADING_DASH.replace(right, "");
        let right = right.trim();

        let prefix = match DIGITS.find(right) {
            Some(digits) => Some(digits.as_str().to_string()),
            None if right.is_empty() => None,
            None => Some(right.to_string()),
        };
        let model = if left.is_empty() { value } else { left };
        return (model.to_string(), prefix);
    }

    let parts: Vec<&str> = DASHES
        .split(value)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let mut model_parts = Vec::new();
    let mut prefix = None;
    for part in &parts {
        if part.chars().all(|c| c.is_ascii_digit()) {
            prefix = Some(part.to_string());
        } else if PS_DIGITS.is_match(part) {
            if let Some(digits) = DIGITS.find(part) {
                prefix = Some(digits.as_str().to_string());
            }
        } else {
            model_parts.push(*part);
        }
    }

    let model = if !model_parts.is_empty() {
        model_parts.join(" - ")
    } else {
        parts.first().copied().unwrap_or(value).to_string()
    };
    (model, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(value: &str) -> (String, Option<String>) {
        split_drone_model(value)
    }

    #[test]
    fn ps_token_splits_model_and_prefix() {
        assert_eq!(split("DJI Agras T40 - PS 07"), ("DJI Agras T40".into(), Some("07".into())));
        assert_eq!(split("T50 ps-3"), ("T50".into(), Some("3".into())));
        assert_eq!(split("XAG P100 – PS — frota A"), ("XAG P100".into(), Some("frota A".into())));
    }

    #[test]
    fn ps_token_without_remainder() {
        assert_eq!(split("Agras T20 PS"), ("Agras T20".into(), None));
        // Nothing on the left: the whole value stays as the model.
        assert_eq!(split("PS 9"), ("PS 9".into(), Some("9".into())));
    }

    #[test]
    fn ps_must_be_a_standalone_token() {
        // "PS12" is one word, so the dash fallback handles it.
        assert_eq!(split("Agras T40 - PS12"), ("Agras T40".into(), Some("12".into())));
        assert_eq!(split("GPS Mapper"), ("GPS Mapper".into(), None));
    }

    #[test]
    fn dash_fallback() {
        assert_eq!(split("Agras T30 - 05"), ("Agras T30".into(), Some("05".into())));
        assert_eq!(split("DJI — Agras — T10"), ("DJI - Agras - T10".into(), None));
        assert_eq!(split("12 - 34"), ("12".into(), Some("34".into())));
    }

    #[test]
    fn ps_word_without_digits_stays_in_model() {
        assert_eq!(
            split("DJI - PSX Edition - 07"),
            ("DJI - PSX Edition".into(), Some("07".into()))
        );
        assert_eq!(split("Agras - Psyche"), ("Agras - Psyche".into(), None));
    }

    #[test]
    fn fleet_prefix_after_ps_token() {
        assert_eq!(split("DJI T40 PS 015"), ("DJI T40".into(), Some("015".into())));
    }

    #[test]
    fn fleet_prefix_after_dash() {
        assert_eq!(split("Agras T30 - 007"), ("Agras T30".into(), Some("007".into())));
    }

    #[test]
    fn degenerate_values() {
        assert_eq!(split("---"), ("---".into(), None));
        assert_eq!(split("Mavic"), ("Mavic".into(), None));
    }
}
