//! Postgres-backed tables and change feed.
//!
//! # Tables
//!
//! - `site_settings` - one row per setting key
//! - `pages_content` - one row per page key
//!
//! Row triggers (see the admin migrations) publish
//! `{"event", "table", "schema"}` payloads on `site_settings_changes` and
//! `pages_content_changes`.

mod listener;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use kynship_core::AdminUserId;

use crate::backend::{
    BackupSink, PageRow, PageUpsert, PagesBackend, SettingRow, SettingUpsert, SettingsBackend,
};
use crate::error::SyncError;
use crate::feed::{Table, spawn_reload_on_change};
use crate::pages::PagesContentStore;
use crate::settings::SettingsStore;

pub use listener::PgChangeFeed;

#[derive(Debug, sqlx::FromRow)]
struct SettingRecord {
    key: String,
    value: Value,
    category: Option<String>,
    updated_by: Option<i32>,
    updated_at: DateTime<Utc>,
}

impl From<SettingRecord> for SettingRow {
    fn from(row: SettingRecord) -> Self {
        Self {
            key: row.key,
            value: row.value,
            category: row.category.unwrap_or_else(|| "general".to_string()),
            updated_by: row.updated_by.map(AdminUserId::new),
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PageRecord {
    page_key: String,
    page_name: Option<String>,
    content: Option<Value>,
    is_active: bool,
    updated_at: DateTime<Utc>,
}

impl From<PageRecord> for PageRow {
    fn from(row: PageRecord) -> Self {
        Self {
            page_name: row
                .page_name
                .unwrap_or_else(|| kynship_core::page_name(&row.page_key).to_string()),
            page_key: row.page_key,
            content: row.content.unwrap_or(Value::Null),
            is_active: row.is_active,
            updated_at: row.updated_at,
        }
    }
}

/// Both content tables over one pool.
#[derive(Clone)]
pub struct PgContentBackend {
    pool: PgPool,
}

impl PgContentBackend {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SettingsBackend for PgContentBackend {
    async fn fetch_settings(&self) -> Result<Vec<SettingRow>, SyncError> {
        let rows = sqlx::query_as::<_, SettingRecord>(
            r"
            SELECT key, value, category, updated_by, updated_at
            FROM site_settings
            ORDER BY key
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn upsert_setting(&self, upsert: &SettingUpsert) -> Result<(), SyncError> {
        sqlx::query(
            r"
            INSERT INTO site_settings (key, value, category, updated_by, updated_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (key) DO UPDATE
            SET value = EXCLUDED.value,
                category = EXCLUDED.category,
                updated_by = EXCLUDED.updated_by,
                updated_at = NOW()
            ",
        )
        .bind(&upsert.key)
        .bind(&upsert.value)
        .bind(upsert.category.as_str())
        .bind(upsert.updated_by)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl PagesBackend for PgContentBackend {
    async fn fetch_active_pages(&self) -> Result<Vec<PageRow>, SyncError> {
        let rows = sqlx::query_as::<_, PageRecord>(
            r"
            SELECT page_key, page_name, content, is_active, updated_at
            FROM pages_content
            WHERE is_active = TRUE
            ORDER BY page_key
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn upsert_page(&self, upsert: &PageUpsert) -> Result<(), SyncError> {
        sqlx::query(
            r"
            INSERT INTO pages_content (page_key, page_name, content, updated_by, updated_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (page_key) DO UPDATE
            SET page_name = EXCLUDED.page_name,
                content = EXCLUDED.content,
                updated_by = EXCLUDED.updated_by,
                updated_at = NOW()
            ",
        )
        .bind(&upsert.page_key)
        .bind(&upsert.page_name)
        .bind(&upsert.content)
        .bind(upsert.updated_by)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Both stores, loaded and kept live by their change listeners.
#[derive(Clone)]
pub struct LiveStores {
    pub settings: Arc<SettingsStore>,
    pub pages: Arc<PagesContentStore>,
}

/// Build both stores over `pool`, start listening for changes, then load.
///
/// Listeners are started before the first load so no change between the two
/// is missed. A failed first load is logged and the stores serve defaults.
///
/// # Errors
///
/// Returns an error if a listener connection cannot be opened.
pub async fn start_live_stores(
    pool: &PgPool,
    backup: Arc<dyn BackupSink>,
) -> Result<LiveStores, SyncError> {
    let backend = Arc::new(PgContentBackend::new(pool.clone()));
    let settings = Arc::new(SettingsStore::new(backend.clone(), backup));
    let pages = Arc::new(PagesContentStore::new(backend));

    let settings_feed = PgChangeFeed::connect(pool, Table::SiteSettings).await?;
    let pages_feed = PgChangeFeed::connect(pool, Table::PagesContent).await?;
    spawn_reload_on_change(settings.clone(), Box::new(settings_feed));
    spawn_reload_on_change(pages.clone(), Box::new(pages_feed));

    let _ = settings.load().await;
    let _ = pages.load().await;

    Ok(LiveStores { settings, pages })
}
