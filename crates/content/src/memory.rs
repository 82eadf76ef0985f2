//! In-memory backend for tests and local tooling.
//!
//! Behaves like the Postgres tables: upserts keyed by `key` / `page_key`,
//! and every write publishes a change event to the feeds handed out by
//! [`MemoryBackend::change_feed`]. Reads and individual writes can be made to
//! fail.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::backend::{PageRow, PageUpsert, PagesBackend, SettingRow, SettingUpsert, SettingsBackend};
use crate::error::SyncError;
use crate::feed::{ChangeEvent, ChangeKind, ChannelFeed, Table};

#[derive(Default)]
struct Tables {
    settings: BTreeMap<String, SettingRow>,
    pages: BTreeMap<String, PageRow>,
    failing_setting_keys: BTreeSet<String>,
    fail_page_upserts: bool,
    fail_reads: bool,
    setting_upserts: usize,
    page_upserts: usize,
    feeds: Vec<(Table, mpsc::UnboundedSender<ChangeEvent>)>,
}

impl Tables {
    fn publish(&mut self, table: Table, kind: ChangeKind) {
        self.feeds.retain(|(feed_table, tx)| {
            *feed_table != table || tx.send(ChangeEvent::new(kind, table)).is_ok()
        });
    }
}

#[derive(Default)]
pub struct MemoryBackend {
    tables: Mutex<Tables>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a setting row directly, without counting an upsert.
    pub fn seed_setting(&self, key: &str, value: Value) {
        self.tables().settings.insert(
            key.to_string(),
            SettingRow {
                key: key.to_string(),
                value,
                category: kynship_core::settings::SettingCategory::for_key(key)
                    .as_str()
                    .to_string(),
                updated_by: None,
                updated_at: Utc::now(),
            },
        );
    }

    /// Store a page row directly, without counting an upsert.
    pub fn seed_page(&self, page_key: &str, content: Value, is_active: bool) {
        self.tables().pages.insert(
            page_key.to_string(),
            PageRow {
                page_key: page_key.to_string(),
                page_name: kynship_core::page_name(page_key).to_string(),
                content,
                is_active,
                updated_at: Utc::now(),
            },
        );
    }

    /// Make every upsert of `key` fail.
    pub fn fail_upserts_for(&self, key: &str) {
        self.tables().failing_setting_keys.insert(key.to_string());
    }

    pub fn fail_page_upserts(&self, fail: bool) {
        self.tables().fail_page_upserts = fail;
    }

    /// Make every fetch fail.
    pub fn fail_reads(&self, fail: bool) {
        self.tables().fail_reads = fail;
    }

    /// Number of setting upserts attempted, failed ones included.
    #[must_use]
    pub fn setting_upserts(&self) -> usize {
        self.tables().setting_upserts
    }

    /// Number of page upserts attempted, failed ones included.
    #[must_use]
    pub fn page_upserts(&self) -> usize {
        self.tables().page_upserts
    }

    #[must_use]
    pub fn setting(&self, key: &str) -> Option<SettingRow> {
        self.tables().settings.get(key).cloned()
    }

    #[must_use]
    pub fn page(&self, page_key: &str) -> Option<PageRow> {
        self.tables().pages.get(page_key).cloned()
    }

    /// Subscribe to writes on `table`.
    #[must_use]
    pub fn change_feed(&self, table: Table) -> ChannelFeed {
        let (tx, feed) = ChannelFeed::channel();
        self.tables().feeds.push((table, tx));
        feed
    }

    /// Publish a change on `table` without writing anything.
    pub fn notify(&self, table: Table, kind: ChangeKind) {
        self.tables().publish(table, kind);
    }
}

#[async_trait]
impl SettingsBackend for MemoryBackend {
    async fn fetch_settings(&self) -> Result<Vec<SettingRow>, SyncError> {
        let tables = self.tables();
        if tables.fail_reads {
            return Err(SyncError::Backend("settings read failed".to_string()));
        }
        Ok(tables.settings.values().cloned().collect())
    }

    async fn upsert_setting(&self, upsert: &SettingUpsert) -> Result<(), SyncError> {
        let mut tables = self.tables();
        tables.setting_upserts += 1;
        if tables.failing_setting_keys.contains(&upsert.key) {
            return Err(SyncError::Backend(format!(
                "upsert of {} rejected",
                upsert.key
            )));
        }

        let kind = if tables.settings.contains_key(&upsert.key) {
            ChangeKind::Update
        } else {
            ChangeKind::Insert
        };
        tables.settings.insert(
            upsert.key.clone(),
            SettingRow {
                key: upsert.key.clone(),
                value: upsert.value.clone(),
                category: upsert.category.as_str().to_string(),
                updated_by: Some(upsert.updated_by),
                updated_at: Utc::now(),
            },
        );
        tables.publish(Table::SiteSettings, kind);
        Ok(())
    }
}

#[async_trait]
impl PagesBackend for MemoryBackend {
    async fn fetch_active_pages(&self) -> Result<Vec<PageRow>, SyncError> {
        let tables = self.tables();
        if tables.fail_reads {
            return Err(SyncError::Backend("pages read failed".to_string()));
        }
        Ok(tables
            .pages
            .values()
            .filter(|row| row.is_active)
            .cloned()
            .collect())
    }

    async fn upsert_page(&self, upsert: &PageUpsert) -> Result<(), SyncError> {
        let mut tables = self.tables();
        tables.page_upserts += 1;
        if tables.fail_page_upserts {
            return Err(SyncError::Backend(format!(
                "upsert of page {} rejected",
                upsert.page_key
            )));
        }

        let (kind, is_active) = tables
            .pages
            .get(&upsert.page_key)
            .map_or((ChangeKind::Insert, true), |row| {
                (ChangeKind::Update, row.is_active)
            });
        tables.pages.insert(
            upsert.page_key.clone(),
            PageRow {
                page_key: upsert.page_key.clone(),
                page_name: upsert.page_name.clone(),
                content: upsert.content.clone(),
                is_active,
                updated_at: Utc::now(),
            },
        );
        tables.publish(Table::PagesContent, kind);
        Ok(())
    }
}
