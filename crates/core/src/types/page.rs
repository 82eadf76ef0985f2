//! Page keys for editable storefront pages.

use serde::{Deserialize, Serialize};

/// Stable identifier of an editable page.
///
/// Each key addresses one row of the `pages_content` table. The table itself
/// accepts any string key; this enum covers the pages that ship with
/// compiled-in defaults and a typed schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKey {
    Home,
    About,
    Contact,
    Faq,
}

/// Returned when a string does not name a known page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page key: {0}")]
pub struct PageKeyError(pub String);

impl PageKey {
    /// Every known page, in admin listing order.
    pub const ALL: [Self; 4] = [Self::Home, Self::About, Self::Contact, Self::Faq];

    /// The key as stored in `pages_content.page_key`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Contact => "contact",
            Self::Faq => "faq",
        }
    }

    /// Arabic display name shown in the admin page list.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Home => "الصفحة الرئيسية",
            Self::About => "من نحن",
            Self::Contact => "اتصل بنا",
            Self::Faq => "الأسئلة الشائعة",
        }
    }
}

impl std::fmt::Display for PageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PageKey {
    type Err = PageKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(Self::Home),
            "about" => Ok(Self::About),
            "contact" => Ok(Self::Contact),
            "faq" => Ok(Self::Faq),
            _ => Err(PageKeyError(s.to_string())),
        }
    }
}

/// Display name for a raw page key, falling back to the key itself.
#[must_use]
pub fn page_name(page_key: &str) -> &str {
    page_key
        .parse::<PageKey>()
        .map_or(page_key, |key| key.display_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_key_round_trip() {
        for key in PageKey::ALL {
            assert_eq!(key.as_str().parse::<PageKey>(), Ok(key));
        }
    }

    #[test]
    fn test_page_name_known_keys() {
        assert_eq!(page_name("home"), "الصفحة الرئيسية");
        assert_eq!(page_name("faq"), "الأسئلة الشائعة");
    }

    #[test]
    fn test_page_name_unknown_key_falls_back_to_raw() {
        assert_eq!(page_name("careers"), "careers");
    }

    #[test]
    fn test_page_name_borrows_owned_key() {
        let owned = String::from("services");
        assert_eq!(page_name(&owned), "services");
        let known = String::from("about");
        assert_eq!(page_name(&known), PageKey::About.display_name());
    }

    #[test]
    fn test_page_key_serde_lowercase() {
        let json = serde_json::to_string(&PageKey::Contact).unwrap_or_default();
        assert_eq!(json, "\"contact\"");
    }
}
