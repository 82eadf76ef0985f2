//! HTTP middleware for admin.
//!
//! Layer order (outermost first): Sentry, `TraceLayer`, sessions. See
//! `main.rs` for the stack.

pub mod auth;
pub mod session;

pub use auth::{OptionalAdminAuth, RequireAdminAuth, set_current_admin};
pub use session::create_session_layer;
