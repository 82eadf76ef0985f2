//! Live site settings: one in-memory value per setting key.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

use kynship_core::settings::{SettingCategory, SiteSettings, default_settings};

use crate::backend::{BackupSink, IdentityProvider, SettingRow, SettingUpsert, SettingsBackend};
use crate::error::SyncError;
use crate::feed::Reloadable;
use crate::snapshot::{Snapshot, SyncStatus};

/// Key the merged settings are written under in the local backup.
pub const BACKUP_KEY: &str = "site_settings";

/// Outcome of a settings update, per key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateReport {
    pub saved: Vec<String>,
    pub failed: Vec<String>,
}

impl UpdateReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Last-write-wins cache of `site_settings`.
///
/// Reads layer the snapshot over the compiled-in defaults. Subscribers get a
/// new value whenever the snapshot changes.
pub struct SettingsStore {
    backend: Arc<dyn SettingsBackend>,
    backup: Arc<dyn BackupSink>,
    state: watch::Sender<Snapshot>,
}

impl SettingsStore {
    #[must_use]
    pub fn new(backend: Arc<dyn SettingsBackend>, backup: Arc<dyn BackupSink>) -> Self {
        let (state, _) = watch::channel(Snapshot::empty());
        Self {
            backend,
            backup,
            state,
        }
    }

    /// Fetch all rows and replace the snapshot.
    ///
    /// On failure the error is logged, the previous snapshot stays in place
    /// and the error is returned for callers that want to report it.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the rows cannot be fetched.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<usize, SyncError> {
        self.state.send_modify(Snapshot::begin_load);

        match self.backend.fetch_settings().await {
            Ok(rows) => {
                let count = rows.len();
                self.apply_full_snapshot(rows);
                debug!(count, "Loaded site settings");
                Ok(count)
            }
            Err(e) => {
                error!(error = %e, "Failed to load site settings");
                self.state.send_modify(Snapshot::abandon_load);
                Err(e)
            }
        }
    }

    /// Replace the whole snapshot with `rows`.
    pub fn apply_full_snapshot(&self, rows: Vec<SettingRow>) {
        let entries = rows.into_iter().map(|row| (row.key, row.value)).collect();
        self.state.send_modify(|snapshot| snapshot.finish_load(entries));
    }

    /// Current value for `key`, or its compiled-in default.
    ///
    /// `None` for keys that were never stored and have no default.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.state
            .borrow()
            .entries
            .get(key)
            .cloned()
            .or_else(|| kynship_core::settings::default_setting(key))
    }

    /// Every setting: defaults underneath, stored values over them.
    #[must_use]
    pub fn all(&self) -> BTreeMap<String, Value> {
        let mut merged = default_settings();
        merged.extend(
            self.state
                .borrow()
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        merged
    }

    /// Typed view of the merged settings.
    #[must_use]
    pub fn site_settings(&self) -> SiteSettings {
        SiteSettings::from_map(&self.all())
    }

    /// Save `changes` one key at a time.
    ///
    /// All keys are applied in memory first. A key whose upsert fails is
    /// logged and put back to its prior value; keys that succeeded stay.
    /// The merged settings are then copied to the backup.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Unauthenticated`] if no admin is signed in, before
    /// anything is written.
    #[instrument(skip(self, identity, changes), fields(keys = changes.len()))]
    pub async fn update(
        &self,
        identity: &dyn IdentityProvider,
        changes: BTreeMap<String, Value>,
    ) -> Result<UpdateReport, SyncError> {
        let Some(admin) = identity.current_user() else {
            warn!("Settings update rejected: not signed in");
            return Err(SyncError::Unauthenticated);
        };

        let prior: BTreeMap<String, Option<Value>> = {
            let snapshot = self.state.borrow();
            changes
                .keys()
                .map(|key| (key.clone(), snapshot.entries.get(key).cloned()))
                .collect()
        };

        self.state.send_modify(|snapshot| {
            for (key, value) in &changes {
                snapshot.entries.insert(key.clone(), value.clone());
            }
        });

        let mut report = UpdateReport::default();
        for (key, value) in changes {
            let upsert = SettingUpsert {
                category: SettingCategory::for_key(&key),
                key,
                value,
                updated_by: admin,
            };

            match self.backend.upsert_setting(&upsert).await {
                Ok(()) => report.saved.push(upsert.key),
                Err(e) => {
                    error!(key = %upsert.key, error = %e, "Failed to save setting");
                    let previous = prior.get(&upsert.key).cloned().flatten();
                    self.state.send_modify(|snapshot| match previous {
                        Some(value) => {
                            snapshot.entries.insert(upsert.key.clone(), value);
                        }
                        None => {
                            snapshot.entries.remove(&upsert.key);
                        }
                    });
                    report.failed.push(upsert.key);
                }
            }
        }

        let merged: Map<String, Value> = self.all().into_iter().collect();
        if let Err(e) = self
            .backup
            .write_backup(BACKUP_KEY, &Value::Object(merged))
            .await
        {
            warn!(error = %e, "Failed to write settings backup");
        }

        info!(
            admin = %admin,
            saved = report.saved.len(),
            failed = report.failed.len(),
            "Site settings updated"
        );
        Ok(report)
    }

    /// Receiver that observes every snapshot change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn status(&self) -> SyncStatus {
        self.state.borrow().status
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }
}

#[async_trait]
impl Reloadable for SettingsStore {
    fn name(&self) -> &'static str {
        "site_settings"
    }

    async fn reload(&self) {
        // Failures are already logged by `load`.
        let _ = self.load().await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::backend::NoBackup;
    use crate::memory::MemoryBackend;
    use kynship_core::AdminUserId;
    use kynship_core::settings::keys;
    use serde_json::json;

    fn store(backend: &Arc<MemoryBackend>) -> SettingsStore {
        SettingsStore::new(backend.clone(), Arc::new(NoBackup))
    }

    fn changes(entries: &[(&str, Value)]) -> BTreeMap<String, Value> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_unloaded_store_serves_defaults() {
        let backend = Arc::new(MemoryBackend::new());
        let store = store(&backend);

        assert_eq!(store.status(), SyncStatus::Uninitialized);
        assert_eq!(store.get(keys::PRIMARY_COLOR), Some(json!("#2563eb")));
        assert_eq!(store.get("not_a_setting"), None);
        assert!(!store.snapshot().is_loaded());
    }

    #[tokio::test]
    async fn test_load_overlays_stored_values() {
        let backend = Arc::new(MemoryBackend::new());
        backend.seed_setting(keys::SITE_NAME, json!("كينشيب"));
        let store = store(&backend);

        assert_eq!(store.load().await.unwrap(), 1);
        assert_eq!(store.status(), SyncStatus::Ready);
        assert_eq!(store.get(keys::SITE_NAME), Some(json!("كينشيب")));
        assert_eq!(store.get(keys::FOOTER_TEXT), default_settings().get(keys::FOOTER_TEXT).cloned());
    }

    /// Holds every fetch until `release` is notified.
    struct GatedBackend {
        inner: MemoryBackend,
        release: tokio::sync::Notify,
    }

    #[async_trait]
    impl SettingsBackend for GatedBackend {
        async fn fetch_settings(&self) -> Result<Vec<SettingRow>, SyncError> {
            self.release.notified().await;
            self.inner.fetch_settings().await
        }

        async fn upsert_setting(&self, upsert: &SettingUpsert) -> Result<(), SyncError> {
            self.inner.upsert_setting(upsert).await
        }
    }

    #[tokio::test]
    async fn test_load_passes_through_loading() {
        let inner = MemoryBackend::new();
        inner.seed_setting(keys::SITE_NAME, json!("كينشيب"));
        let backend = Arc::new(GatedBackend {
            inner,
            release: tokio::sync::Notify::new(),
        });
        let store = Arc::new(SettingsStore::new(backend.clone(), Arc::new(NoBackup)));
        let mut rx = store.subscribe();

        let load = tokio::spawn({
            let store = store.clone();
            async move { store.load().await }
        });

        rx.wait_for(|snapshot| snapshot.status == SyncStatus::Loading)
            .await
            .unwrap();
        assert_eq!(store.status(), SyncStatus::Loading);
        assert!(!store.snapshot().is_loaded());
        assert_eq!(store.get(keys::SITE_NAME), Some(json!("kynship")));

        backend.release.notify_one();
        assert_eq!(load.await.unwrap().unwrap(), 1);
        assert_eq!(store.status(), SyncStatus::Ready);
        assert_eq!(store.get(keys::SITE_NAME), Some(json!("كينشيب")));
    }

    #[tokio::test]
    async fn test_failed_load_keeps_snapshot() {
        let backend = Arc::new(MemoryBackend::new());
        backend.seed_setting(keys::SITE_NAME, json!("A"));
        let store = store(&backend);
        store.load().await.unwrap();

        backend.fail_reads(true);
        assert!(store.load().await.is_err());
        assert_eq!(store.status(), SyncStatus::Ready);
        assert_eq!(store.get(keys::SITE_NAME), Some(json!("A")));
    }

    #[tokio::test]
    async fn test_update_without_admin_writes_nothing() {
        let backend = Arc::new(MemoryBackend::new());
        let store = store(&backend);

        let result = store
            .update(&None::<AdminUserId>, changes(&[(keys::SITE_NAME, json!("X"))]))
            .await;

        assert!(matches!(result, Err(SyncError::Unauthenticated)));
        assert_eq!(backend.setting_upserts(), 0);
        assert_eq!(store.get(keys::SITE_NAME), Some(json!("kynship")));
    }

    #[tokio::test]
    async fn test_failed_key_is_reverted_others_kept() {
        let backend = Arc::new(MemoryBackend::new());
        backend.seed_setting("a", json!(0));
        backend.fail_upserts_for("a");
        let store = store(&backend);
        store.load().await.unwrap();

        let report = store
            .update(
                &AdminUserId::new(1),
                changes(&[("a", json!(1)), ("b", json!(2))]),
            )
            .await
            .unwrap();

        assert_eq!(report.saved, vec!["b".to_string()]);
        assert_eq!(report.failed, vec!["a".to_string()]);
        assert!(!report.is_success());
        assert_eq!(store.get("a"), Some(json!(0)));
        assert_eq!(store.get("b"), Some(json!(2)));
        assert_eq!(backend.setting("b").unwrap().category, "general");
    }

    #[tokio::test]
    async fn test_failed_new_key_is_removed() {
        let backend = Arc::new(MemoryBackend::new());
        backend.fail_upserts_for("announcement");
        let store = store(&backend);

        store
            .update(&AdminUserId::new(1), changes(&[("announcement", json!("hi"))]))
            .await
            .unwrap();

        assert_eq!(store.get("announcement"), None);
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let backend = Arc::new(MemoryBackend::new());
        let store = store(&backend);
        let mut rx = store.subscribe();

        store
            .update(&AdminUserId::new(2), changes(&[(keys::SITE_LOGO, json!("/img/logo.png"))]))
            .await
            .unwrap();

        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().entries.get(keys::SITE_LOGO).cloned();
        assert_eq!(seen, Some(json!("/img/logo.png")));
    }

    #[tokio::test]
    async fn test_typed_view_respects_false() {
        let backend = Arc::new(MemoryBackend::new());
        backend.seed_setting(keys::INTRO_VIDEO_AUTOPLAY, json!(false));
        let store = store(&backend);
        store.load().await.unwrap();

        assert!(!store.site_settings().intro_video.autoplay);
    }
}
