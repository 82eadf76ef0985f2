//! Site-wide settings: keys, categories, compiled-in defaults and the typed view.
//!
//! Settings are stored one row per key in `site_settings`. The compiled-in
//! defaults below fill every key that has never been saved.

mod site;
mod video;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use site::{BrandColors, ContactSettings, SiteSettings, SocialLinks};
pub use video::{IntroVideoSettings, IntroVideoUpdate, youtube_video_id};

/// Setting keys known to the editors.
pub mod keys {
    pub const SITE_NAME: &str = "site_name";
    pub const SITE_TAGLINE: &str = "site_tagline";
    pub const SITE_LOGO: &str = "site_logo";
    pub const CONTACT_PHONE: &str = "contact_phone";
    pub const CONTACT_EMAIL: &str = "contact_email";
    pub const CONTACT_ADDRESS: &str = "contact_address";
    pub const CONTACT_WHATSAPP: &str = "contact_whatsapp";
    pub const FACEBOOK_URL: &str = "facebook_url";
    pub const INSTAGRAM_URL: &str = "instagram_url";
    pub const TWITTER_URL: &str = "twitter_url";
    pub const PRIMARY_COLOR: &str = "primary_color";
    pub const SECONDARY_COLOR: &str = "secondary_color";
    pub const FOOTER_TEXT: &str = "footer_text";
    pub const INTRO_VIDEO_ENABLED: &str = "intro_video_enabled";
    pub const INTRO_VIDEO_URL: &str = "intro_video_url";
    pub const INTRO_VIDEO_CAN_SKIP: &str = "intro_video_can_skip";
    pub const INTRO_VIDEO_AUTOPLAY: &str = "intro_video_autoplay";
    pub const INTRO_VIDEO_SHOW_ONCE: &str = "intro_video_show_once";
    pub const INTRO_VIDEO_SKIP_DELAY: &str = "intro_video_skip_delay";
    pub const HERO_BACKGROUND: &str = "hero_background";
    pub const IMAGES_BACKGROUND: &str = "images_background";

    /// The six keys owned by the intro-video editor.
    pub const INTRO_VIDEO: [&str; 6] = [
        INTRO_VIDEO_ENABLED,
        INTRO_VIDEO_URL,
        INTRO_VIDEO_CAN_SKIP,
        INTRO_VIDEO_AUTOPLAY,
        INTRO_VIDEO_SHOW_ONCE,
        INTRO_VIDEO_SKIP_DELAY,
    ];
}

/// Grouping recorded in `site_settings.category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingCategory {
    General,
    Contact,
    Social,
    Appearance,
    IntroVideo,
}

impl SettingCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Contact => "contact",
            Self::Social => "social",
            Self::Appearance => "appearance",
            Self::IntroVideo => "intro_video",
        }
    }

    /// Category for a key. Keys the editors don't know about are `general`.
    #[must_use]
    pub fn for_key(key: &str) -> Self {
        match key {
            keys::CONTACT_PHONE
            | keys::CONTACT_EMAIL
            | keys::CONTACT_ADDRESS
            | keys::CONTACT_WHATSAPP => Self::Contact,
            keys::FACEBOOK_URL | keys::INSTAGRAM_URL | keys::TWITTER_URL => Self::Social,
            keys::PRIMARY_COLOR
            | keys::SECONDARY_COLOR
            | keys::HERO_BACKGROUND
            | keys::IMAGES_BACKGROUND => Self::Appearance,
            k if k.starts_with("intro_video_") => Self::IntroVideo,
            _ => Self::General,
        }
    }
}

impl std::fmt::Display for SettingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every compiled-in setting, keyed by setting key.
#[must_use]
pub fn default_settings() -> BTreeMap<String, Value> {
    SiteSettings::default().to_map()
}

/// The compiled-in default for one key, if the key is known.
#[must_use]
pub fn default_setting(key: &str) -> Option<Value> {
    default_settings().remove(key)
}
