//! Core types for Kynship.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod localized;
pub mod page;
pub mod status;

pub use id::*;
pub use localized::LocalizedText;
pub use page::{PageKey, PageKeyError, page_name};
pub use status::*;
