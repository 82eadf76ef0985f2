//! Kynship Content - settings and page-content sync layer.
//!
//! Each store keeps an in-memory snapshot of one remote table, seeded by
//! compiled-in defaults, hydrated with [`SettingsStore::load`] /
//! [`PagesContentStore::load`], and kept current by reloading on every change
//! notification. Writes go straight to the backend as upserts.
//!
//! # Modules
//!
//! - [`backend`] - traits for tables, identity and backups
//! - [`settings`] - [`SettingsStore`]
//! - [`pages`] - [`PagesContentStore`]
//! - [`feed`] - change events and the reload listener
//! - [`backup`] - local file backup
//! - [`memory`] - in-memory backend for tests and tooling
//! - `postgres` - sqlx tables and `LISTEN/NOTIFY` feed (feature `postgres`)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod backup;
pub mod error;
pub mod feed;
pub mod memory;
pub mod pages;
pub mod settings;
pub mod snapshot;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use backend::{
    BackupSink, IdentityProvider, NoBackup, PageRow, PageUpsert, PagesBackend, SettingRow,
    SettingUpsert, SettingsBackend,
};
pub use backup::FileBackup;
pub use error::{MSG_LOGIN_REQUIRED, MSG_SAVE_FAILED, MSG_SAVED, SyncError};
pub use feed::{ChangeEvent, ChangeFeed, ChangeKind, ChannelFeed, Reloadable, Table, spawn_reload_on_change};
pub use memory::MemoryBackend;
pub use pages::PagesContentStore;
pub use settings::{SettingsStore, UpdateReport};
pub use snapshot::{Snapshot, SyncStatus};
