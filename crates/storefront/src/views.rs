//! View models built from the live settings and page content.
//!
//! These carry the presentation rules of the site chrome and home page so
//! the frontend renders them as-is.

use serde::Serialize;

use kynship_core::content::{HomeAbout, HomeContent, HomeStats};
use kynship_core::settings::youtube_video_id;
use kynship_core::SiteSettings;

/// Placeholder logo path shipped with the frontend; treated as "no logo".
pub const PLACEHOLDER_LOGO: &str = "/logo.svg";

/// Suffix appended to every home counter.
const STAT_SUFFIX: &str = "+";

/// Logo image with its alt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoView {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub logo: Option<LogoView>,
    pub name: String,
    pub tagline: String,
    pub name_color: String,
    pub tagline_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialNetwork {
    Facebook,
    Instagram,
    Twitter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLinkView {
    pub network: SocialNetwork,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterContactView {
    pub phone: String,
    pub email: String,
    pub address: String,
    pub whatsapp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterView {
    pub logo: Option<LogoView>,
    pub name: String,
    pub tagline: String,
    pub social: Vec<SocialLinkView>,
    pub contact: FooterContactView,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeView {
    pub primary_color: String,
    pub secondary_color: String,
    pub images_background: Option<String>,
}

/// Intro video overlay; `None` on the site view when disabled or unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntroVideoView {
    pub url: String,
    pub youtube_id: Option<String>,
    pub can_skip: bool,
    pub autoplay: bool,
    pub show_once: bool,
    pub skip_delay: u32,
}

/// Everything the layout needs, from `site_settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteView {
    pub header: HeaderView,
    pub footer: FooterView,
    pub theme: ThemeView,
    pub intro_video: Option<IntroVideoView>,
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

impl SiteView {
    #[must_use]
    pub fn from_settings(settings: &SiteSettings) -> Self {
        let name = settings.site_name.display().to_string();
        let tagline = settings.site_tagline.display().to_string();
        let logo = |src: &str| LogoView {
            src: src.to_string(),
            alt: name.clone(),
        };

        let header_logo = Some(settings.site_logo.as_str())
            .filter(|src| !src.is_empty() && *src != PLACEHOLDER_LOGO)
            .map(logo);
        let footer_logo = Some(settings.site_logo.as_str())
            .filter(|src| !src.is_empty())
            .map(logo);

        let social = [
            (SocialNetwork::Facebook, &settings.social.facebook),
            (SocialNetwork::Instagram, &settings.social.instagram),
            (SocialNetwork::Twitter, &settings.social.twitter),
        ]
        .into_iter()
        .filter(|(_, url)| !url.is_empty())
        .map(|(network, url)| SocialLinkView {
            network,
            url: url.clone(),
        })
        .collect();

        let video = &settings.intro_video;
        let intro_video = (video.enabled && !video.url.is_empty()).then(|| IntroVideoView {
            url: video.url.clone(),
            youtube_id: youtube_video_id(&video.url).map(str::to_string),
            can_skip: video.can_skip,
            autoplay: video.autoplay,
            show_once: video.show_once,
            skip_delay: video.skip_delay,
        });

        Self {
            header: HeaderView {
                logo: header_logo,
                name: name.clone(),
                tagline: tagline.clone(),
                name_color: settings.colors.primary.clone(),
                tagline_color: settings.colors.secondary.clone(),
            },
            footer: FooterView {
                logo: footer_logo,
                name,
                tagline,
                social,
                contact: FooterContactView {
                    phone: settings.contact.phone.clone(),
                    email: settings.contact.email.clone(),
                    address: settings.contact.address.clone(),
                    whatsapp: settings.contact.whatsapp.clone(),
                },
                text: settings.footer_text.clone(),
            },
            theme: ThemeView {
                primary_color: settings.colors.primary.clone(),
                secondary_color: settings.colors.secondary.clone(),
                images_background: non_empty(&settings.images_background),
            },
            intro_video,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroView {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub background_image: Option<String>,
}

/// One home-page counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatView {
    pub label: &'static str,
    pub value: i64,
    pub suffix: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeView {
    pub hero: HeroView,
    pub about: HomeAbout,
    pub stats: Vec<StatView>,
}

impl HomeView {
    /// The hero background comes from site settings only; the page's own
    /// `background_image` is kept in storage but never rendered.
    #[must_use]
    pub fn new(content: HomeContent, settings: &SiteSettings) -> Self {
        let background_image = non_empty(&settings.hero_background);

        Self {
            hero: HeroView {
                title: content.hero.title,
                subtitle: content.hero.subtitle,
                button_text: content.hero.button_text,
                background_image,
            },
            about: content.about,
            stats: stat_views(&content.stats),
        }
    }
}

fn stat_views(stats: &HomeStats) -> Vec<StatView> {
    [
        ("سنوات الخبرة", &stats.experience),
        ("مشروع مكتمل", &stats.projects),
        ("عميل راضٍ", &stats.clients),
        ("موظف محترف", &stats.employees),
    ]
    .into_iter()
    .map(|(label, raw)| StatView {
        label,
        value: leading_integer(raw),
        suffix: STAT_SUFFIX,
    })
    .collect()
}

/// The signed integer at the start of `raw` (after whitespace); 0 if there
/// are no digits. Values past the `i64` range saturate.
#[must_use]
pub fn leading_integer(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let magnitude = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0_i64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(i64::from(digit - b'0'))
        });

    if negative { -magnitude } else { magnitude }
}
