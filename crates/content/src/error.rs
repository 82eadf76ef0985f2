//! Sync-layer errors and the editor-facing messages they map to.

use thiserror::Error;

/// Toast shown after a successful save.
pub const MSG_SAVED: &str = "تم حفظ التغييرات بنجاح";
/// Toast shown when any part of a save failed.
pub const MSG_SAVE_FAILED: &str = "حدث خطأ أثناء الحفظ";
/// Toast shown when a write is attempted without a signed-in admin.
pub const MSG_LOGIN_REQUIRED: &str = "يجب تسجيل الدخول أولاً";

/// Errors raised by the stores and their backends.
#[derive(Debug, Error)]
pub enum SyncError {
    /// No signed-in admin; raised before any remote call.
    #[error("not authenticated")]
    Unauthenticated,

    /// Content that cannot be stored for a page.
    #[error("invalid content: {0}")]
    InvalidContent(String),

    /// A remote read or write failed.
    #[error("backend error: {0}")]
    Backend(String),

    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    /// Message to show the editor for this failure.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Unauthenticated => MSG_LOGIN_REQUIRED,
            _ => MSG_SAVE_FAILED,
        }
    }
}
