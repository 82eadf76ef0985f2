//! Typed per-page content schema.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::{fill_defaults, lift_sections};
use crate::types::PageKey;

/// Hero banner on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeHero {
    pub title: String,
    pub subtitle: String,
    pub background_image: String,
    pub button_text: String,
}

/// "Why choose us" block on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeAbout {
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
}

/// Counters on the home page.
///
/// Kept as strings because editors store free text; numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeStats {
    #[serde(deserialize_with = "string_or_number")]
    pub experience: String,
    #[serde(deserialize_with = "string_or_number")]
    pub projects: String,
    #[serde(deserialize_with = "string_or_number")]
    pub clients: String,
    #[serde(deserialize_with = "string_or_number")]
    pub employees: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeContent {
    pub hero: HomeHero,
    pub about: HomeAbout,
    pub stats: HomeStats,
}

/// Title/subtitle banner used by the secondary pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageHero {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutBody {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutContent {
    pub hero: PageHero,
    pub content: AboutBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactContent {
    pub hero: PageHero,
    pub info: ContactInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqContent {
    pub hero: PageHero,
}

/// A stored section that did not fit the schema and was left at its default.
#[derive(Debug)]
pub struct RejectedSection {
    /// Section name; `None` when the stored content was not an object at all.
    pub section: Option<String>,
    pub error: serde_json::Error,
}

/// Content of one known page, tagged by page key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "lowercase")]
pub enum PageContent {
    Home(HomeContent),
    About(AboutContent),
    Contact(ContactContent),
    Faq(FaqContent),
}

impl PageContent {
    /// The compiled-in content for a page.
    #[must_use]
    pub fn default_for(key: PageKey) -> Self {
        match key {
            PageKey::Home => Self::Home(HomeContent::default()),
            PageKey::About => Self::About(AboutContent::default()),
            PageKey::Contact => Self::Contact(ContactContent::default()),
            PageKey::Faq => Self::Faq(FaqContent::default()),
        }
    }

    /// Build the typed view of stored content.
    ///
    /// Sections nested under `sections` are lifted first, then each stored
    /// section is laid over the page's defaults field by field. A section
    /// whose stored shape the schema cannot accept (for example an object
    /// where a string is expected) keeps its default and is returned in the
    /// rejected list; the other sections are unaffected.
    #[must_use]
    pub fn from_stored(key: PageKey, stored: Option<&Value>) -> (Self, Vec<RejectedSection>) {
        let mut content = Self::default_for(key);
        let mut rejected = Vec::new();

        match stored.map(lift_sections) {
            None | Some(Value::Null) => {}
            Some(Value::Object(sections)) => {
                let mut merged = content.to_value();
                for (section, value) in sections {
                    let mut candidate = merged.clone();
                    fill_defaults(
                        &mut candidate,
                        &Value::Object(Map::from_iter([(section.clone(), value)])),
                    );
                    match Self::from_value(key, candidate.clone()) {
                        Ok(parsed) => {
                            content = parsed;
                            merged = candidate;
                        }
                        Err(error) => rejected.push(RejectedSection {
                            section: Some(section),
                            error,
                        }),
                    }
                }
            }
            Some(_) => rejected.push(RejectedSection {
                section: None,
                error: <serde_json::Error as serde::de::Error>::custom(
                    "page content is not an object",
                ),
            }),
        }

        (content, rejected)
    }

    fn from_value(key: PageKey, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match key {
            PageKey::Home => Self::Home(serde_json::from_value(value)?),
            PageKey::About => Self::About(serde_json::from_value(value)?),
            PageKey::Contact => Self::Contact(serde_json::from_value(value)?),
            PageKey::Faq => Self::Faq(serde_json::from_value(value)?),
        })
    }

    /// The untagged section map, as stored in `pages_content.content`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let value = match self {
            Self::Home(c) => serde_json::to_value(c),
            Self::About(c) => serde_json::to_value(c),
            Self::Contact(c) => serde_json::to_value(c),
            Self::Faq(c) => serde_json::to_value(c),
        };
        value.unwrap_or_else(|_| Value::Object(Map::new()))
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
