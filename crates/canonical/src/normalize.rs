use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

use crate::cache;
use crate::mode::NormalizeMode;
use crate::whitespace::collapse_whitespace;

/// Normalizes a free-form property name into its canonical key.
///
/// Results are memoized process-wide per `(raw, mode)` pair, so repeated
/// calls over the small key vocabulary of a database are cheap.
///
/// # Examples
///
/// ```rust
/// use canonical::{normalize, NormalizeMode};
///
/// assert_eq!(normalize("Área Útil (ha)", NormalizeMode::Strict), "area util ha");
/// assert_eq!(normalize("Área Útil (ha)", NormalizeMode::Flexible), "area util ha");
/// assert_eq!(normalize("a-b", NormalizeMode::Flexible), "ab");
/// ```
pub fn normalize(raw: &str, mode: NormalizeMode) -> String {
    if raw.is_empty() {
        return String::new();
    }
    cache::get_or_insert_with(raw, mode, || normalize_uncached(raw, mode))
}

/// Same as [`normalize`] without touching the memo cache.
pub fn normalize_uncached(raw: &str, mode: NormalizeMode) -> String {
    // NFKD first so accents become separate combining marks we can drop.
    let mut folded = String::with_capacity(raw.len());
    for ch in raw.nfkd() {
        if canonical_combining_class(ch) != 0 {
            continue;
        }
        // Lowercasing can expand a single character (e.g. 'İ' -> "i\u{307}").
        for lower in ch.to_lowercase() {
            folded.push(lower);
        }
    }

    let mut out = String::with_capacity(folded.len());
    let mut in_punct_run = false;
    for ch in folded.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch.is_whitespace() {
            out.push(ch);
            in_punct_run = false;
            continue;
        }
        match mode {
            NormalizeMode::Strict => {
                if !in_punct_run {
                    out.push(' ');
                }
                in_punct_run = true;
            }
            NormalizeMode::Flexible => {}
        }
    }

    collapse_whitespace(&out)
}

/// Renders a raw name as a canonical identifier (`snake_case`).
///
/// Uses strict normalization, joins words with `_` and collapses repeats.
///
/// ```rust
/// use canonical::to_identifier;
///
/// assert_eq!(to_identifier("Hectares Pulverizados"), "hectares_pulverizados");
/// assert_eq!(to_identifier("__already__snake__"), "already_snake");
/// ```
pub fn to_identifier(raw: &str) -> String {
    let normalized = normalize(raw, NormalizeMode::Strict);
    if normalized.is_empty() {
        return normalized;
    }

    let mut ident = String::with_capacity(normalized.len());
    for ch in normalized.chars() {
        let ch = if ch == ' ' { '_' } else { ch };
        if ch == '_' && (ident.is_empty() || ident.ends_with('_')) {
            continue;
        }
        ident.push(ch);
    }
    while ident.ends_with('_') {
        ident.pop();
    }
    ident
}
