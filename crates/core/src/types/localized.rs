//! Text that may be stored plain or per-language.

use serde::{Deserialize, Serialize};

/// A setting value such as `site_name` that older editors saved as a plain
/// string and newer ones as `{ "ar": ..., "en": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    Localized {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ar: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        en: Option<String>,
    },
}

impl LocalizedText {
    /// Text to display: the plain string, else Arabic, else English, else empty.
    #[must_use]
    pub fn display(&self) -> &str {
        match self {
            Self::Plain(s) => s,
            Self::Localized { ar, en } => ar
                .as_deref()
                .filter(|s| !s.is_empty())
                .or_else(|| en.as_deref().filter(|s| !s.is_empty()))
                .unwrap_or_default(),
        }
    }

    /// Whether there is nothing to display.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.display().is_empty()
    }
}

impl Default for LocalizedText {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl From<&str> for LocalizedText {
    fn from(s: &str) -> Self {
        Self::Plain(s.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_string() {
        let text: LocalizedText = serde_json::from_value(json!("kynship")).unwrap();
        assert_eq!(text.display(), "kynship");
    }

    #[test]
    fn test_prefers_arabic() {
        let text: LocalizedText =
            serde_json::from_value(json!({"ar": "كينشيب", "en": "kynship"})).unwrap();
        assert_eq!(text.display(), "كينشيب");
    }

    #[test]
    fn test_falls_back_to_english() {
        let text: LocalizedText = serde_json::from_value(json!({"en": "kynship"})).unwrap();
        assert_eq!(text.display(), "kynship");

        let text: LocalizedText = serde_json::from_value(json!({"ar": "", "en": "x"})).unwrap();
        assert_eq!(text.display(), "x");
    }

    #[test]
    fn test_empty_object_displays_nothing() {
        let text: LocalizedText = serde_json::from_value(json!({})).unwrap();
        assert!(text.is_empty());
    }
}
