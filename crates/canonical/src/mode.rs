//! Normalization strictness levels.

use serde::{Deserialize, Serialize};

/// How punctuation is treated when a name is normalized.
///
/// Both modes strip accents, lowercase and collapse whitespace. They differ
/// only in what happens to characters outside `[a-z0-9]` and whitespace:
///
/// ```text
/// input            Strict             Flexible
/// "RPM/Tipo"       "rpm tipo"         "rpmtipo"
/// "Área (ha)"      "area ha"          "area ha"
/// ```
///
/// [`Strict`](NormalizeMode::Strict) is the canonical form used for keys.
/// [`Flexible`](NormalizeMode::Flexible) can merge tokens that strict keeps
/// apart, so it is only ever used as a fallback matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizeMode {
    /// Replace every run of punctuation with a single space.
    #[default]
    Strict,
    /// Delete punctuation outright.
    Flexible,
}
