//! Reduction of one [`Property`] to a [`SimpleValue`].
//!
//! Dispatch is an exhaustive match over the property union, so adding a tag
//! to [`Property`] forces a decision here.
//!
//! # Date policy
//!
//! Dates reduce to a single scalar everywhere (plain `date`, formula dates,
//! rollup dates): the `start` string, falling back to `end`. The report layer
//! only ever formats one instant, and keeping one shape avoids two readers
//! disagreeing about what a date field holds.

use serde_json::Value;
use tracing::debug;

use crate::property::{DateRange, FileRef, Formula, Property, RichTextSegment, Rollup, UniqueId, User};
use crate::value::SimpleValue;

/// Reduces a decoded property to its plain value. Never fails.
pub fn simplify(prop: &Property) -> SimpleValue {
    match prop {
        Property::Title(segments) | Property::RichText(segments) => {
            SimpleValue::Text(plain_text(segments))
        }
        Property::Number(n) => n.clone().map_or(SimpleValue::Empty, SimpleValue::Number),
        Property::Select(option) | Property::Status(option) => {
            SimpleValue::from_opt_text(option.as_ref().and_then(|o| o.name.as_deref()))
        }
        Property::MultiSelect(options) => {
            SimpleValue::texts(options.iter().filter_map(|o| o.name.as_deref()))
        }
        Property::Relation(refs) => SimpleValue::texts(
            refs.iter()
                .filter_map(|r| r.id.as_deref())
                .filter(|id| !id.is_empty())
                .map(|id| id.replace('-', "")),
        ),
        Property::People(users) => SimpleValue::texts(users.iter().filter_map(user_label)),
        Property::Date(range) => date_value(range.as_ref()),
        Property::Checkbox(b) => b.map_or(SimpleValue::Empty, SimpleValue::Bool),
        Property::Url(s)
        | Property::Email(s)
        | Property::PhoneNumber(s)
        | Property::CreatedTime(s)
        | Property::LastEditedTime(s) => SimpleValue::from_opt_text(s.as_deref()),
        Property::Files(files) => SimpleValue::texts(files.iter().filter_map(file_url)),
        Property::Formula(formula) => formula_value(formula),
        Property::Rollup(rollup) => rollup_value(rollup),
        Property::CreatedBy(user) | Property::LastEditedBy(user) => {
            SimpleValue::from_opt_text(user.as_ref().and_then(user_label))
        }
        Property::UniqueId(uid) => unique_id_value(uid.as_ref()),
        Property::Verification(payload) => verification_value(payload),
        Property::Unknown(tag) => {
            debug!(tag = ?tag, "unknown Notion property type");
            SimpleValue::Empty
        }
    }
}

/// Decodes and reduces a raw property object in one step.
pub fn simplify_value(raw: &Value) -> SimpleValue {
    simplify(&Property::from_value(raw))
}

/// Concatenates segment text in order: `plain_text`, else `text.content`.
pub fn plain_text(segments: &[RichTextSegment]) -> String {
    let mut out = String::new();
    for seg in segments {
        let text = seg
            .plain_text
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| seg.text.as_ref().and_then(|t| t.content.as_deref()));
        if let Some(text) = text {
            out.push_str(text);
        }
    }
    out
}

/// Display name, else the person's email, else the raw id.
pub fn user_label(user: &User) -> Option<&str> {
    non_empty(user.name.as_deref())
        .or_else(|| non_empty(user.person.as_ref().and_then(|p| p.email.as_deref())))
        .or_else(|| non_empty(user.id.as_deref()))
}

fn date_value(range: Option<&DateRange>) -> SimpleValue {
    let Some(range) = range else {
        return SimpleValue::Empty;
    };
    let instant = non_empty(range.start.as_deref()).or_else(|| non_empty(range.end.as_deref()));
    SimpleValue::from_opt_text(instant)
}

fn file_url(file: &FileRef) -> Option<&str> {
    let location = match file.kind.as_deref() {
        Some("file") => file.file.as_ref(),
        Some("external") => file.external.as_ref(),
        _ => None,
    };
    non_empty(location.and_then(|l| l.url.as_deref()))
}

fn formula_value(formula: &Formula) -> SimpleValue {
    match formula {
        Formula::String(s) => SimpleValue::from_opt_text(s.as_deref()),
        Formula::Number(n) => n.clone().map_or(SimpleValue::Empty, SimpleValue::Number),
        Formula::Boolean(b) => b.map_or(SimpleValue::Empty, SimpleValue::Bool),
        Formula::Date(range) => date_value(range.as_ref()),
        Formula::Unsupported(kind) => {
            debug!(kind = ?kind, "unsupported formula result type");
            SimpleValue::Empty
        }
    }
}

fn rollup_value(rollup: &Rollup) -> SimpleValue {
    match rollup {
        Rollup::Array(items) => {
            let mut values = Vec::new();
            for item in items {
                match simplify(item) {
                    SimpleValue::List(inner) => values.extend(inner),
                    v if v.is_blank() => {}
                    v => values.push(v),
                }
            }
            match values.len() {
                0 => SimpleValue::Empty,
                1 => values.pop().unwrap_or_default(),
                _ => SimpleValue::List(values),
            }
        }
        Rollup::Number(n) => n.clone().map_or(SimpleValue::Empty, SimpleValue::Number),
        Rollup::Date(range) => date_value(range.as_ref()),
        Rollup::String(s) => SimpleValue::from_opt_text(s.as_deref()),
        Rollup::Boolean(b) => b.map_or(SimpleValue::Empty, SimpleValue::Bool),
        Rollup::Empty => SimpleValue::Empty,
    }
}

fn unique_id_value(uid: Option<&UniqueId>) -> SimpleValue {
    let Some(number) = uid.and_then(|u| u.number.as_ref()) else {
        return SimpleValue::Empty;
    };
    match uid.and_then(|u| non_empty(u.prefix.as_deref())) {
        Some(prefix) => SimpleValue::Text(format!("{prefix}{number}")),
        None => SimpleValue::Text(number.to_string()),
    }
}

fn verification_value(payload: &Value) -> SimpleValue {
    match payload.get("state").and_then(Value::as_str) {
        Some(state) if !state.is_empty() => SimpleValue::text(state),
        _ if payload.is_null() => SimpleValue::Raw(Value::Object(Default::default())),
        _ => SimpleValue::Raw(payload.clone()),
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
