//! Whitespace normalization.
//!
//! Uses Unicode's definition of whitespace, so tabs, newlines and
//! non-breaking spaces copied out of spreadsheets all collapse the same way.
//!
//! ```rust
//! use canonical::collapse_whitespace;
//!
//! assert_eq!(collapse_whitespace("  hello   world  "), "hello world");
//! ```

/// Collapses repeated whitespace, trims edges, and turns newlines into
/// single spaces.
///
/// Returns an empty string for empty or whitespace-only input.
///
/// ```rust
/// use canonical::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("hello\r\nworld"), "hello world");
/// assert_eq!(collapse_whitespace("hello\u{00A0}world"), "hello world");
/// assert_eq!(collapse_whitespace("   \n\t   "), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
