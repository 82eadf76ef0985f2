//! Kynship Core - Shared types library.
//!
//! This crate provides the types shared by every Kynship component:
//! - `content` - the settings/page-content sync layer
//! - `storefront` - Public-facing read API
//! - `admin` - Content editors and order dashboard
//! - `cli` - Command-line tools for migrations and content inspection
//!
//! # Architecture
//!
//! The core crate contains only types, compiled-in defaults and pure
//! functions - no I/O, no database access, no HTTP clients.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, page keys, localized text, order status
//! - [`content`] - Page content defaults and the typed per-page schema
//! - [`settings`] - Site settings defaults and the typed settings view

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod content;
pub mod settings;
pub mod types;

pub use content::{
    AboutContent, ContactContent, FaqContent, HomeContent, PageContent, default_page_content,
    merge_page_content,
};
pub use settings::{IntroVideoSettings, IntroVideoUpdate, SiteSettings, default_settings};
pub use types::*;
