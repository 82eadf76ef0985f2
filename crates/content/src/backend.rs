//! Seams between the stores and the outside world.
//!
//! The stores only talk to these traits. Production wires them to Postgres
//! (`postgres` feature), tests use [`crate::MemoryBackend`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use kynship_core::AdminUserId;
use kynship_core::settings::SettingCategory;

use crate::error::SyncError;

/// One row of `site_settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingRow {
    pub key: String,
    pub value: Value,
    pub category: String,
    pub updated_by: Option<AdminUserId>,
    pub updated_at: DateTime<Utc>,
}

/// Write of one setting; the backend stamps `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingUpsert {
    pub key: String,
    pub value: Value,
    pub category: SettingCategory,
    pub updated_by: AdminUserId,
}

/// One row of `pages_content`.
///
/// `content` is raw: either an object or a string holding serialized JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRow {
    pub page_key: String,
    pub page_name: String,
    pub content: Value,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

/// Write of one page's full content blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUpsert {
    pub page_key: String,
    pub page_name: String,
    pub content: Value,
    pub updated_by: AdminUserId,
}

#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// Fetch every settings row.
    async fn fetch_settings(&self) -> Result<Vec<SettingRow>, SyncError>;

    /// Insert or update one setting, keyed by `key`.
    async fn upsert_setting(&self, upsert: &SettingUpsert) -> Result<(), SyncError>;
}

#[async_trait]
pub trait PagesBackend: Send + Sync {
    /// Fetch every page row with `is_active = true`.
    async fn fetch_active_pages(&self) -> Result<Vec<PageRow>, SyncError>;

    /// Insert or update one page, keyed by `page_key`.
    async fn upsert_page(&self, upsert: &PageUpsert) -> Result<(), SyncError>;
}

/// Resolves the admin performing a write.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<AdminUserId>;
}

impl IdentityProvider for AdminUserId {
    fn current_user(&self) -> Option<AdminUserId> {
        Some(*self)
    }
}

impl IdentityProvider for Option<AdminUserId> {
    fn current_user(&self) -> Option<AdminUserId> {
        *self
    }
}

/// Local, non-authoritative copy of saved data.
#[async_trait]
pub trait BackupSink: Send + Sync {
    async fn write_backup(&self, key: &str, value: &Value) -> Result<(), SyncError>;
}

/// Backup sink that keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBackup;

#[async_trait]
impl BackupSink for NoBackup {
    async fn write_backup(&self, _key: &str, _value: &Value) -> Result<(), SyncError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_providers() {
        let admin = AdminUserId::new(4);
        assert_eq!(admin.current_user(), Some(admin));
        assert_eq!(Some(admin).current_user(), Some(admin));
        assert_eq!(None::<AdminUserId>.current_user(), None);
    }
}
