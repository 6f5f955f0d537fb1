//! Canonical property-name layer.
//!
//! Notion databases are edited by people, so the same column shows up as
//! `"Nome do Piloto"`, `"nome_do_piloto"` or `"Nome  do piloto:"` depending on
//! who touched the schema last. This crate reduces any of those to a single
//! canonical key so the rest of the pipeline can bind fields by name.
//!
//! ## What we do
//!
//! - Unicode NFKD decomposition followed by removal of combining marks
//!   (accent stripping: `"Área"` → `"area"`)
//! - Lowercasing
//! - Punctuation handling in one of two [`NormalizeMode`]s
//! - Whitespace collapsing to single ASCII spaces
//! - Identifier rendering (`"area util ha"` → `"area_util_ha"`)
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. The same input and mode give
//! the same key on any machine, which is what makes the process-wide memo
//! cache in [`normalize`] safe.
//!
//! ## Invariants worth knowing
//!
//! - Output only ever contains `[a-z0-9]` and single interior spaces
//! - `normalize(normalize(s, m), m) == normalize(s, m)`
//! - Empty input yields an empty key, never an error

mod cache;
mod mode;
mod normalize;
mod whitespace;

pub use crate::cache::cache_len;
pub use crate::mode::NormalizeMode;
pub use crate::normalize::{normalize, normalize_uncached, to_identifier};
pub use crate::whitespace::collapse_whitespace;
