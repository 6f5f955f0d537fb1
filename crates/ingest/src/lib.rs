//! Notion property ingest layer.
//!
//! This is where page data enters the report pipeline. A Notion page carries
//! a `properties` object whose values are tagged unions with a different
//! nested shape per tag. We reduce that to a flat map of canonical key →
//! plain value that the report model can bind against.
//!
//! ## What we do here
//!
//! - **Decode** each property into the typed [`Property`] union, leniently:
//!   a malformed payload becomes an empty value, never an error
//! - **Simplify** each property to a [`SimpleValue`] (text, number, bool or
//!   list) with [`simplify`]
//! - **Canonicalize** keys with [`canonical::to_identifier`], first key wins
//!   on collisions ([`simplify_map`])
//! - **Locate** properties by pattern when the exact key is unknown
//!   ([`find_property`])
//!
//! ## Example
//!
//! ```
//! use ingest::simplify_map;
//! use serde_json::json;
//!
//! let page = json!({
//!     "Nome da Fazenda": {"type": "title", "title": [{"plain_text": "Boa Vista"}]},
//!     "Cultura": {"type": "multi_select", "multi_select": [{"name": "Soja"}, {"name": "Milho"}]}
//! });
//! let map = simplify_map(page.as_object().unwrap());
//!
//! assert_eq!(map.text("nome_da_fazenda").as_deref(), Some("Boa Vista"));
//! assert_eq!(map.list("cultura"), vec!["Soja", "Milho"]);
//! ```

mod extract;
mod locate;
mod map;
mod property;
mod value;

pub use crate::extract::{plain_text, simplify, simplify_value, user_label};
pub use crate::locate::{find_property, find_simplified};
pub use crate::map::{normalize_properties, number_of, simplify_map, SimplifiedMap};
pub use crate::property::{
    DateRange, FileLocation, FileRef, Formula, NamedOption, PersonDetails, Property,
    RelationRef, RichTextSegment, Rollup, TextContent, UniqueId, User,
};
pub use crate::value::SimpleValue;

/// Returns the `properties` object of a full Notion page response, or the
/// value itself when it is already a bare property map.
pub fn page_properties(page: &serde_json::Value) -> Option<&serde_json::Map<String, serde_json::Value>> {
    match page.get("properties") {
        Some(serde_json::Value::Object(props)) => Some(props),
        _ if page.get("object").is_some() => None,
        _ => page.as_object(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn page_properties_accepts_page_or_bare_map() {
        let page = json!({"object": "page", "id": "x", "properties": {"A": {"type": "number", "number": 1}}});
        assert_eq!(page_properties(&page).map(|m| m.len()), Some(1));

        let bare = json!({"A": {"type": "number", "number": 1}, "B": {"type": "checkbox", "checkbox": true}});
        assert_eq!(page_properties(&bare).map(|m| m.len()), Some(2));

        let broken = json!({"object": "page", "properties": []});
        assert!(page_properties(&broken).is_none());
        assert!(page_properties(&json!([1, 2])).is_none());
    }
}
