//! Typed view of a Notion property payload.
//!
//! Every entry of a page's `properties` object looks like
//! `{"id": ..., "type": "<tag>", "<tag>": <payload>}` where the payload shape
//! is fully determined by the tag. [`Property`] is that discriminated union
//! with one variant per known tag and an [`Unknown`](Property::Unknown)
//! catch-all.
//!
//! # Leniency
//!
//! Decoding never fails. Each payload is read independently:
//!
//! - a payload of the wrong shape decodes as absent (`None` / empty list)
//! - list entries of the wrong shape are skipped, their siblings kept
//! - a missing or non-string `type` yields `Unknown(None)`
//!
//! so one bad field cannot take the rest of the page down with it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// One segment of a `title` or `rich_text` array.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RichTextSegment {
    #[serde(default)]
    pub plain_text: Option<String>,
    #[serde(default)]
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub content: Option<String>,
}

/// `select`, `status` and `multi_select` options.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct NamedOption {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RelationRef {
    #[serde(default)]
    pub id: Option<String>,
}

/// A workspace user or bot, as found in `people`, `created_by` and
/// `last_edited_by`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub person: Option<PersonDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PersonDetails {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// An entry of a `files` property: either uploaded (`file`) or linked
/// (`external`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct FileRef {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub file: Option<FileLocation>,
    #[serde(default)]
    pub external: Option<FileLocation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct FileLocation {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UniqueId {
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub number: Option<Number>,
}

/// Result of a `formula` property, selected by its inner `type`.
#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    String(Option<String>),
    Number(Option<Number>),
    Boolean(Option<bool>),
    Date(Option<DateRange>),
    /// Inner type missing or not one of the four above.
    Unsupported(Option<String>),
}

/// Result of a `rollup` property.
#[derive(Debug, Clone, PartialEq)]
pub enum Rollup {
    /// Per-element values, each itself a tagged property.
    Array(Vec<Property>),
    Number(Option<Number>),
    Date(Option<DateRange>),
    String(Option<String>),
    Boolean(Option<bool>),
    /// None of the known result keys were present.
    Empty,
}

/// A decoded Notion property.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Title(Vec<RichTextSegment>),
    RichText(Vec<RichTextSegment>),
    Number(Option<Number>),
    Select(Option<NamedOption>),
    MultiSelect(Vec<NamedOption>),
    Relation(Vec<RelationRef>),
    People(Vec<User>),
    Date(Option<DateRange>),
    Checkbox(Option<bool>),
    Url(Option<String>),
    Email(Option<String>),
    PhoneNumber(Option<String>),
    Status(Option<NamedOption>),
    Files(Vec<FileRef>),
    Formula(Formula),
    Rollup(Rollup),
    CreatedBy(Option<User>),
    LastEditedBy(Option<User>),
    CreatedTime(Option<String>),
    LastEditedTime(Option<String>),
    UniqueId(Option<UniqueId>),
    Verification(Value),
    /// Unrecognized tag, or no usable `type` at all.
    Unknown(Option<String>),
}

impl Property {
    /// Decodes a raw property object. Never fails; see the module docs.
    pub fn from_value(value: &Value) -> Property {
        let Some(object) = value.as_object() else {
            return Property::Unknown(None);
        };
        let Some(tag) = object.get("type").and_then(Value::as_str) else {
            return Property::Unknown(None);
        };
        let payload = object.get(tag).unwrap_or(&Value::Null);

        match tag {
            "title" => Property::Title(lenient_list(payload)),
            "rich_text" => Property::RichText(lenient_list(payload)),
            "number" => Property::Number(lenient(payload)),
            "select" => Property::Select(lenient(payload)),
            "multi_select" => Property::MultiSelect(lenient_list(payload)),
            "relation" => Property::Relation(lenient_list(payload)),
            "people" => Property::People(lenient_list(payload)),
            "date" => Property::Date(lenient(payload)),
            "checkbox" => Property::Checkbox(lenient(payload)),
            "url" => Property::Url(lenient(payload)),
            "email" => Property::Email(lenient(payload)),
            "phone_number" => Property::PhoneNumber(lenient(payload)),
            "status" => Property::Status(lenient(payload)),
            "files" => Property::Files(lenient_list(payload)),
            "formula" => Property::Formula(Formula::from_payload(payload)),
            "rollup" => Property::Rollup(Rollup::from_payload(payload)),
            "created_by" => Property::CreatedBy(lenient(payload)),
            "last_edited_by" => Property::LastEditedBy(lenient(payload)),
            "created_time" => Property::CreatedTime(lenient(payload)),
            "last_edited_time" => Property::LastEditedTime(lenient(payload)),
            "unique_id" => Property::UniqueId(lenient(payload)),
            "verification" => Property::Verification(payload.clone()),
            other => Property::Unknown(Some(other.to_owned())),
        }
    }

    /// The Notion type tag this variant corresponds to.
    pub fn tag(&self) -> Option<&str> {
        let tag = match self {
            Property::Title(_) => "title",
            Property::RichText(_) => "rich_text",
            Property::Number(_) => "number",
            Property::Select(_) => "select",
            Property::MultiSelect(_) => "multi_select",
            Property::Relation(_) => "relation",
            Property::People(_) => "people",
            Property::Date(_) => "date",
            Property::Checkbox(_) => "checkbox",
            Property::Url(_) => "url",
            Property::Email(_) => "email",
            Property::PhoneNumber(_) => "phone_number",
            Property::Status(_) => "status",
            Property::Files(_) => "files",
            Property::Formula(_) => "formula",
            Property::Rollup(_) => "rollup",
            Property::CreatedBy(_) => "created_by",
            Property::LastEditedBy(_) => "last_edited_by",
            Property::CreatedTime(_) => "created_time",
            Property::LastEditedTime(_) => "last_edited_time",
            Property::UniqueId(_) => "unique_id",
            Property::Verification(_) => "verification",
            Property::Unknown(tag) => return tag.as_deref(),
        };
        Some(tag)
    }
}

impl<'de> Deserialize<'de> for Property {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Property::from_value(&value))
    }
}

impl Formula {
    fn from_payload(payload: &Value) -> Formula {
        let kind = payload.get("type").and_then(Value::as_str);
        let field = |key: &str| payload.get(key).unwrap_or(&Value::Null);
        match kind {
            Some("string") => Formula::String(lenient(field("string"))),
            Some("number") => Formula::Number(lenient(field("number"))),
            Some("boolean") => Formula::Boolean(lenient(field("boolean"))),
            Some("date") => Formula::Date(lenient(field("date"))),
            other => Formula::Unsupported(other.map(str::to_owned)),
        }
    }
}

impl Rollup {
    fn from_payload(payload: &Value) -> Rollup {
        let Some(object) = payload.as_object() else {
            return Rollup::Empty;
        };

        if object.get("type").and_then(Value::as_str) == Some("array") {
            let items = object
                .get("array")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(Property::from_value).collect())
                .unwrap_or_default();
            return Rollup::Array(items);
        }

        // First present key wins, even when its value is null.
        if let Some(v) = object.get("number") {
            Rollup::Number(lenient(v))
        } else if let Some(v) = object.get("date") {
            Rollup::Date(lenient(v))
        } else if let Some(v) = object.get("string") {
            Rollup::String(lenient(v))
        } else if let Some(v) = object.get("boolean") {
            Rollup::Boolean(lenient(v))
        } else {
            Rollup::Empty
        }
    }
}

fn lenient<T: DeserializeOwned>(payload: &Value) -> Option<T> {
    if payload.is_null() {
        return None;
    }
    T::deserialize(payload).ok()
}

fn lenient_list<T: DeserializeOwned>(payload: &Value) -> Vec<T> {
    payload
        .as_array()
        .map(|items| items.iter().filter_map(lenient).collect())
        .unwrap_or_default()
}
