//! Session-related types for admin authentication.
//!
//! The login flow that writes these lives outside this crate; handlers only
//! read them.

use serde::{Deserialize, Serialize};

use kynship_core::AdminUserId;

/// Session-stored admin identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's database ID.
    pub id: AdminUserId,
    /// Admin's email address.
    pub email: String,
    /// Admin's display name.
    pub name: String,
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
