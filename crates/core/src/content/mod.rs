//! Page content: compiled-in defaults, merge rules and the typed schema.
//!
//! Stored page content is an untyped JSON object keyed by section name
//! (`hero`, `about`, `stats`, ...). Two read paths exist:
//!
//! - [`merge_page_content`] - the raw view. Stored sections replace default
//!   sections wholesale; nothing below section level is merged.
//! - [`PageContent::from_stored`] - the typed view. Every missing or empty
//!   field takes the compiled-in default for that page, and a section that
//!   does not fit the schema falls back to its default alone, so consumers
//!   never see a hole.

mod defaults;
mod schema;

use serde_json::{Map, Value};

pub use schema::{
    AboutBody, AboutContent, ContactContent, ContactInfo, FaqContent, HomeAbout, HomeContent,
    HomeHero, HomeStats, PageContent, PageHero, RejectedSection,
};

use crate::types::PageKey;

/// Compiled-in default content for a raw page key.
///
/// Returns `None` for keys without a shipped default.
#[must_use]
pub fn default_page_content(page_key: &str) -> Option<Value> {
    page_key
        .parse::<PageKey>()
        .ok()
        .map(|key| PageContent::default_for(key).to_value())
}

/// Overlay stored content on the default for one page.
///
/// Both sides objects: default sections, then every stored top-level key
/// replaces the default section of the same name. Otherwise the stored value
/// wins if present, then the default, then an empty object.
#[must_use]
pub fn merge_page_content(default: Option<&Value>, stored: Option<&Value>) -> Value {
    match (default, stored) {
        (Some(Value::Object(base)), Some(Value::Object(over))) => {
            let mut merged = base.clone();
            for (section, value) in over {
                merged.insert(section.clone(), value.clone());
            }
            Value::Object(merged)
        }
        (_, Some(stored)) => stored.clone(),
        (Some(default), None) => default.clone(),
        (None, None) => Value::Object(Map::new()),
    }
}

/// Move sections nested under a `sections` object up to the top level.
///
/// The page editor historically wrote `{ "sections": { "hero": {...} } }`
/// while defaults keep sections at the top. Nested sections win.
#[must_use]
pub fn lift_sections(content: &Value) -> Value {
    let Value::Object(map) = content else {
        return content.clone();
    };
    let mut lifted = map.clone();
    if let Some(Value::Object(sections)) = lifted.remove("sections") {
        for (section, value) in sections {
            lifted.insert(section, value);
        }
    }
    Value::Object(lifted)
}

/// Recursively fill `base` with `over`, skipping nulls and empty strings.
///
/// Objects merge key by key; arrays and scalars replace.
pub(crate) fn fill_defaults(base: &mut Value, over: &Value) {
    match (base, over) {
        (Value::Object(base), Value::Object(over)) => {
            for (key, value) in over {
                match base.get_mut(key) {
                    Some(slot) => fill_defaults(slot, value),
                    None if !is_blank(value) => {
                        base.insert(key.clone(), value.clone());
                    }
                    None => {}
                }
            }
        }
        (_, over) if is_blank(over) => {}
        (slot, over) => *slot = over.clone(),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
