//! Typed view over the flat settings map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::keys;
use super::video::IntroVideoSettings;
use crate::types::LocalizedText;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSettings {
    pub phone: String,
    pub email: String,
    pub address: String,
    pub whatsapp: String,
}

/// Social profile links. Empty links are hidden by the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub facebook: String,
    pub instagram: String,
    pub twitter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandColors {
    pub primary: String,
    pub secondary: String,
}

/// All site settings, with compiled-in defaults for anything unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub site_name: LocalizedText,
    pub site_tagline: LocalizedText,
    pub site_logo: String,
    pub contact: ContactSettings,
    pub social: SocialLinks,
    pub colors: BrandColors,
    pub footer_text: String,
    pub intro_video: IntroVideoSettings,
    pub hero_background: String,
    pub images_background: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: LocalizedText::from("kynship"),
            site_tagline: LocalizedText::from("الجودة والأناقة في منتجات الألوميتال"),
            site_logo: String::new(),
            contact: ContactSettings {
                phone: "+20 100 123 4567".to_string(),
                email: "info@kynship.com".to_string(),
                address: "القاهرة، مصر".to_string(),
                whatsapp: "+20 100 123 4567".to_string(),
            },
            social: SocialLinks {
                facebook: "https://facebook.com/alupro".to_string(),
                instagram: "https://instagram.com/alupro".to_string(),
                twitter: "https://twitter.com/alupro".to_string(),
            },
            colors: BrandColors {
                primary: "#2563eb".to_string(),
                secondary: "#1e40af".to_string(),
            },
            footer_text: "© 2024 kynship. جميع الحقوق محفوظة.".to_string(),
            intro_video: IntroVideoSettings::default(),
            hero_background: String::new(),
            images_background: String::new(),
        }
    }
}

impl SiteSettings {
    /// Read the typed settings from a flat `key -> value` map.
    ///
    /// Missing keys and values of the wrong JSON type take the default.
    /// Name, tagline, contact, color and footer text also treat an empty
    /// string as unset; links and images keep an empty value so they can be
    /// hidden.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, Value>) -> Self {
        let d = Self::default();
        Self {
            site_name: localized(map, keys::SITE_NAME, d.site_name),
            site_tagline: localized(map, keys::SITE_TAGLINE, d.site_tagline),
            site_logo: text_as_stored(map, keys::SITE_LOGO, d.site_logo),
            contact: ContactSettings {
                phone: text_or_default(map, keys::CONTACT_PHONE, d.contact.phone),
                email: text_or_default(map, keys::CONTACT_EMAIL, d.contact.email),
                address: text_or_default(map, keys::CONTACT_ADDRESS, d.contact.address),
                whatsapp: text_or_default(map, keys::CONTACT_WHATSAPP, d.contact.whatsapp),
            },
            social: SocialLinks {
                facebook: text_as_stored(map, keys::FACEBOOK_URL, d.social.facebook),
                instagram: text_as_stored(map, keys::INSTAGRAM_URL, d.social.instagram),
                twitter: text_as_stored(map, keys::TWITTER_URL, d.social.twitter),
            },
            colors: BrandColors {
                primary: text_or_default(map, keys::PRIMARY_COLOR, d.colors.primary),
                secondary: text_or_default(map, keys::SECONDARY_COLOR, d.colors.secondary),
            },
            footer_text: text_or_default(map, keys::FOOTER_TEXT, d.footer_text),
            intro_video: IntroVideoSettings::from_map(map),
            hero_background: text_as_stored(map, keys::HERO_BACKGROUND, d.hero_background),
            images_background: text_as_stored(map, keys::IMAGES_BACKGROUND, d.images_background),
        }
    }

    /// Flatten back into one entry per setting key.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        let mut map = BTreeMap::from([
            (keys::SITE_NAME.to_string(), localized_value(&self.site_name)),
            (keys::SITE_TAGLINE.to_string(), localized_value(&self.site_tagline)),
            (keys::SITE_LOGO.to_string(), json!(self.site_logo)),
            (keys::CONTACT_PHONE.to_string(), json!(self.contact.phone)),
            (keys::CONTACT_EMAIL.to_string(), json!(self.contact.email)),
            (keys::CONTACT_ADDRESS.to_string(), json!(self.contact.address)),
            (keys::CONTACT_WHATSAPP.to_string(), json!(self.contact.whatsapp)),
            (keys::FACEBOOK_URL.to_string(), json!(self.social.facebook)),
            (keys::INSTAGRAM_URL.to_string(), json!(self.social.instagram)),
            (keys::TWITTER_URL.to_string(), json!(self.social.twitter)),
            (keys::PRIMARY_COLOR.to_string(), json!(self.colors.primary)),
            (keys::SECONDARY_COLOR.to_string(), json!(self.colors.secondary)),
            (keys::FOOTER_TEXT.to_string(), json!(self.footer_text)),
            (keys::HERO_BACKGROUND.to_string(), json!(self.hero_background)),
            (keys::IMAGES_BACKGROUND.to_string(), json!(self.images_background)),
        ]);
        map.extend(self.intro_video.to_map());
        map
    }
}

fn localized(map: &BTreeMap<String, Value>, key: &str, default: LocalizedText) -> LocalizedText {
    map.get(key)
        .and_then(|v| serde_json::from_value::<LocalizedText>(v.clone()).ok())
        .filter(|text| !text.is_empty())
        .unwrap_or(default)
}

fn localized_value(text: &LocalizedText) -> Value {
    serde_json::to_value(text).unwrap_or_else(|_| json!(text.display()))
}

fn text_or_default(map: &BTreeMap<String, Value>, key: &str, default: String) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map_or(default, str::to_string)
}

fn text_as_stored(map: &BTreeMap<String, Value>, key: &str, default: String) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .map_or(default, str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, Value)]) -> BTreeMap<String, Value> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_empty_map_is_default() {
        assert_eq!(SiteSettings::from_map(&BTreeMap::new()), SiteSettings::default());
    }

    #[test]
    fn test_round_trip_through_map() {
        let settings = SiteSettings::default();
        assert_eq!(SiteSettings::from_map(&settings.to_map()), settings);
    }

    #[test]
    fn test_localized_site_name() {
        let settings = SiteSettings::from_map(&map(&[(
            keys::SITE_NAME,
            json!({"ar": "كينشيب", "en": "kynship"}),
        )]));
        assert_eq!(settings.site_name.display(), "كينشيب");
    }

    #[test]
    fn test_empty_contact_falls_back_but_empty_link_is_kept() {
        let settings = SiteSettings::from_map(&map(&[
            (keys::CONTACT_PHONE, json!("")),
            (keys::FACEBOOK_URL, json!("")),
        ]));
        assert_eq!(settings.contact.phone, "+20 100 123 4567");
        assert_eq!(settings.social.facebook, "");
    }

    #[test]
    fn test_wrong_type_falls_back() {
        let settings = SiteSettings::from_map(&map(&[(keys::PRIMARY_COLOR, json!(42))]));
        assert_eq!(settings.colors.primary, "#2563eb");
    }
}
