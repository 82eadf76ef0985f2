//! Welcome video shown when a visitor first opens the storefront.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::keys;

/// Matches `youtube.com/watch?v=<id>` and `youtu.be/<id>`.
static YOUTUBE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&\s]+)").expect("Invalid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntroVideoSettings {
    pub enabled: bool,
    pub url: String,
    pub can_skip: bool,
    pub autoplay: bool,
    pub show_once: bool,
    /// Seconds before the skip button appears.
    pub skip_delay: u32,
}

impl Default for IntroVideoSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            url: String::new(),
            can_skip: true,
            autoplay: true,
            show_once: true,
            skip_delay: 3,
        }
    }
}

impl IntroVideoSettings {
    /// Read from a flat settings map; missing or mistyped values take the default.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, Value>) -> Self {
        let d = Self::default();
        Self {
            enabled: flag(map, keys::INTRO_VIDEO_ENABLED, d.enabled),
            url: map
                .get(keys::INTRO_VIDEO_URL)
                .and_then(Value::as_str)
                .map_or(d.url, str::to_string),
            can_skip: flag(map, keys::INTRO_VIDEO_CAN_SKIP, d.can_skip),
            autoplay: flag(map, keys::INTRO_VIDEO_AUTOPLAY, d.autoplay),
            show_once: flag(map, keys::INTRO_VIDEO_SHOW_ONCE, d.show_once),
            skip_delay: map
                .get(keys::INTRO_VIDEO_SKIP_DELAY)
                .and_then(seconds)
                .unwrap_or(d.skip_delay),
        }
    }

    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        BTreeMap::from([
            (keys::INTRO_VIDEO_ENABLED.to_string(), json!(self.enabled)),
            (keys::INTRO_VIDEO_URL.to_string(), json!(self.url)),
            (keys::INTRO_VIDEO_CAN_SKIP.to_string(), json!(self.can_skip)),
            (keys::INTRO_VIDEO_AUTOPLAY.to_string(), json!(self.autoplay)),
            (keys::INTRO_VIDEO_SHOW_ONCE.to_string(), json!(self.show_once)),
            (keys::INTRO_VIDEO_SKIP_DELAY.to_string(), json!(self.skip_delay)),
        ])
    }

    /// YouTube id of the configured video, if the URL is a YouTube link.
    #[must_use]
    pub fn youtube_id(&self) -> Option<&str> {
        youtube_video_id(&self.url)
    }
}

/// Edit of the intro video settings; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IntroVideoUpdate {
    pub enabled: Option<bool>,
    pub url: Option<String>,
    pub can_skip: Option<bool>,
    pub autoplay: Option<bool>,
    pub show_once: Option<bool>,
    pub skip_delay: Option<u32>,
}

impl IntroVideoUpdate {
    /// Setting keys for the fields that are present.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        [
            (keys::INTRO_VIDEO_ENABLED, self.enabled.map(Value::from)),
            (keys::INTRO_VIDEO_URL, self.url.clone().map(Value::from)),
            (keys::INTRO_VIDEO_CAN_SKIP, self.can_skip.map(Value::from)),
            (keys::INTRO_VIDEO_AUTOPLAY, self.autoplay.map(Value::from)),
            (keys::INTRO_VIDEO_SHOW_ONCE, self.show_once.map(Value::from)),
            (keys::INTRO_VIDEO_SKIP_DELAY, self.skip_delay.map(Value::from)),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
        .collect()
    }
}

/// Extract the video id from a YouTube watch or short link.
#[must_use]
pub fn youtube_video_id(url: &str) -> Option<&str> {
    YOUTUBE_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn flag(map: &BTreeMap<String, Value>, key: &str, default: bool) -> bool {
    map.get(key).and_then(Value::as_bool).unwrap_or(default)
}

fn seconds(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_watch_url() {
        assert_eq!(
            youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10s"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_youtube_short_url() {
        assert_eq!(youtube_video_id("https://youtu.be/abc123"), Some("abc123"));
    }

    #[test]
    fn test_non_youtube_url() {
        assert_eq!(youtube_video_id("https://cdn.kynship.com/intro.mp4"), None);
        assert_eq!(youtube_video_id(""), None);
    }

    #[test]
    fn test_false_flags_are_respected() {
        let map = BTreeMap::from([
            (keys::INTRO_VIDEO_CAN_SKIP.to_string(), json!(false)),
            (keys::INTRO_VIDEO_SKIP_DELAY.to_string(), json!("5")),
        ]);
        let video = IntroVideoSettings::from_map(&map);
        assert!(!video.can_skip);
        assert!(video.autoplay);
        assert_eq!(video.skip_delay, 5);
    }

    #[test]
    fn test_update_writes_present_fields_only() {
        let update: IntroVideoUpdate =
            serde_json::from_value(json!({"enabled": true, "skip_delay": 7})).unwrap_or_default();
        assert_eq!(
            update.to_map(),
            BTreeMap::from([
                (keys::INTRO_VIDEO_ENABLED.to_string(), json!(true)),
                (keys::INTRO_VIDEO_SKIP_DELAY.to_string(), json!(7)),
            ])
        );

        let empty: IntroVideoUpdate = serde_json::from_value(json!({})).unwrap_or_default();
        assert!(empty.to_map().is_empty());
    }

    #[test]
    fn test_full_update_matches_settings_map() {
        let settings = IntroVideoSettings {
            enabled: true,
            url: "https://youtu.be/abc123".to_string(),
            ..IntroVideoSettings::default()
        };
        let update: IntroVideoUpdate =
            serde_json::from_value(serde_json::to_value(&settings).unwrap_or_default())
                .unwrap_or_default();
        assert_eq!(update.to_map(), settings.to_map());
    }
}
