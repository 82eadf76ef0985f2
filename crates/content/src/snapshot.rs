//! Snapshot state shared by both stores.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Lifecycle of a store.
///
/// `Uninitialized -> Loading -> Ready`, then `Ready -> Loading -> Ready` on
/// every reload. A failed load returns to `Ready` with the previous entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    Uninitialized,
    Loading,
    Ready,
}

/// In-memory copy of one remote table, keyed by setting or page key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub entries: BTreeMap<String, Value>,
    pub status: SyncStatus,
    /// When the last successful load finished; `None` if none has.
    pub loaded_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
            status: SyncStatus::Uninitialized,
            loaded_at: None,
        }
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded_at.is_some()
    }

    pub(crate) fn begin_load(&mut self) {
        self.status = SyncStatus::Loading;
    }

    pub(crate) fn finish_load(&mut self, entries: BTreeMap<String, Value>) {
        self.entries = entries;
        self.status = SyncStatus::Ready;
        self.loaded_at = Some(Utc::now());
    }

    /// Leave `Loading` without touching the entries.
    pub(crate) fn abandon_load(&mut self) {
        self.status = SyncStatus::Ready;
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::empty()
    }
}
