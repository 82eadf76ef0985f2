//! Live page content: one JSON blob per active page.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

use kynship_core::content::{default_page_content, merge_page_content};
use kynship_core::{PageContent, PageKey, page_name};

use crate::backend::{IdentityProvider, PageRow, PageUpsert, PagesBackend};
use crate::error::SyncError;
use crate::feed::Reloadable;
use crate::snapshot::{Snapshot, SyncStatus};

/// Last-write-wins cache of active `pages_content` rows.
pub struct PagesContentStore {
    backend: Arc<dyn PagesBackend>,
    state: watch::Sender<Snapshot>,
}

impl PagesContentStore {
    #[must_use]
    pub fn new(backend: Arc<dyn PagesBackend>) -> Self {
        let (state, _) = watch::channel(Snapshot::empty());
        Self { backend, state }
    }

    /// Fetch all active rows and replace the snapshot.
    ///
    /// A row whose content can't be decoded is logged and left out, so that
    /// page falls back to its defaults.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the rows cannot be fetched. The previous
    /// snapshot is kept.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<usize, SyncError> {
        self.state.send_modify(Snapshot::begin_load);

        match self.backend.fetch_active_pages().await {
            Ok(rows) => {
                let count = self.apply_full_snapshot(rows);
                debug!(count, "Loaded page content");
                Ok(count)
            }
            Err(e) => {
                error!(error = %e, "Failed to load page content");
                self.state.send_modify(Snapshot::abandon_load);
                Err(e)
            }
        }
    }

    /// Replace the whole snapshot with the active rows in `rows`.
    ///
    /// Returns the number of pages kept.
    pub fn apply_full_snapshot(&self, rows: Vec<PageRow>) -> usize {
        let mut entries = BTreeMap::new();
        for row in rows.into_iter().filter(|row| row.is_active) {
            match decode_content(&row.content) {
                Ok(content) => {
                    entries.insert(row.page_key, content);
                }
                Err(e) => {
                    error!(page_key = %row.page_key, error = %e, "Invalid page content, using defaults");
                }
            }
        }

        let count = entries.len();
        self.state.send_modify(|snapshot| snapshot.finish_load(entries));
        count
    }

    /// Content of a page: defaults overlaid section by section with stored
    /// content. Unknown pages with nothing stored give `{}`.
    #[must_use]
    pub fn page_content(&self, page_key: &str) -> Value {
        let default = default_page_content(page_key);
        let snapshot = self.state.borrow();
        merge_page_content(default.as_ref(), snapshot.entries.get(page_key))
    }

    /// Typed content of a known page, with per-field defaults. A stored
    /// section that does not fit the schema is logged and served from its
    /// default.
    #[must_use]
    pub fn typed_page_content(&self, key: PageKey) -> PageContent {
        let stored = self.state.borrow().entries.get(key.as_str()).cloned();
        let (content, rejected) = PageContent::from_stored(key, stored.as_ref());
        for section in rejected {
            warn!(
                page_key = %key,
                section = section.section.as_deref().unwrap_or("*"),
                error = %section.error,
                "Stored section does not fit schema, using default"
            );
        }
        content
    }

    /// Replace the content of a page.
    ///
    /// The snapshot is updated only after the remote write succeeds.
    ///
    /// # Errors
    ///
    /// - [`SyncError::Unauthenticated`] if no admin is signed in
    /// - [`SyncError::InvalidContent`] if `content` is not a JSON object
    /// - the backend error if the write fails
    #[instrument(skip(self, identity, content))]
    pub async fn update_page_content(
        &self,
        identity: &dyn IdentityProvider,
        page_key: &str,
        content: Value,
    ) -> Result<(), SyncError> {
        let Some(admin) = identity.current_user() else {
            warn!("Page update rejected: not signed in");
            return Err(SyncError::Unauthenticated);
        };

        if !content.is_object() {
            return Err(SyncError::InvalidContent(format!(
                "content for {page_key} must be an object"
            )));
        }

        let upsert = PageUpsert {
            page_key: page_key.to_string(),
            page_name: page_name(page_key).to_string(),
            content,
            updated_by: admin,
        };

        if let Err(e) = self.backend.upsert_page(&upsert).await {
            error!(page_key, error = %e, "Failed to save page content");
            return Err(e);
        }

        self.state.send_modify(|snapshot| {
            snapshot.entries.insert(upsert.page_key, upsert.content);
        });
        info!(page_key, admin = %admin, "Page content updated");
        Ok(())
    }

    /// Display name of a page; unknown keys are shown as-is.
    #[must_use]
    pub fn page_name(page_key: &str) -> &str {
        page_name(page_key)
    }

    /// Every known page with its display name.
    #[must_use]
    pub fn page_keys() -> Vec<(PageKey, &'static str)> {
        PageKey::ALL
            .iter()
            .map(|key| (*key, key.display_name()))
            .collect()
    }

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
impl Reloadable for PagesContentStore {
    fn name(&self) -> &'static str {
        "pages_content"
    }

    async fn reload(&self) {
        let _ = self.load().await;
    }
}

/// Decode a stored content column into a JSON object.
///
/// Strings are parsed as serialized JSON.
///
/// # Errors
///
/// Returns an error if a string does not parse, or the result is not an
/// object.
pub fn decode_content(raw: &Value) -> Result<Value, SyncError> {
    let value = match raw {
        Value::String(text) => serde_json::from_str(text)?,
        other => other.clone(),
    };

    if value.is_object() {
        Ok(value)
    } else {
        Err(SyncError::InvalidContent(
            "page content is not an object".to_string(),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;
    use kynship_core::AdminUserId;
    use kynship_core::content::{ContactContent, HomeStats};
    use serde_json::json;

    #[test]
    fn test_decode_object_and_string() {
        assert_eq!(decode_content(&json!({"a": 1})).unwrap(), json!({"a": 1}));
        assert_eq!(decode_content(&json!("{\"a\":1}")).unwrap(), json!({"a": 1}));
        assert!(decode_content(&json!("{not json")).is_err());
        assert!(decode_content(&json!([1, 2])).is_err());
    }

    #[tokio::test]
    async fn test_never_saved_pages_are_defaults() {
        let store = PagesContentStore::new(Arc::new(MemoryBackend::new()));
        store.load().await.unwrap();

        for key in PageKey::ALL {
            assert_eq!(
                store.page_content(key.as_str()),
                default_page_content(key.as_str()).unwrap()
            );
        }
        assert_eq!(store.page_content("careers"), json!({}));
    }

    #[tokio::test]
    async fn test_section_level_merge() {
        let backend = Arc::new(MemoryBackend::new());
        backend.seed_page("home", json!({"hero": {"title": "X"}}), true);
        let store = PagesContentStore::new(backend);
        store.load().await.unwrap();

        let home = store.page_content("home");
        assert_eq!(home["hero"], json!({"title": "X"}));
        assert_eq!(home["stats"], serde_json::to_value(HomeStats::default()).unwrap());
    }

    #[tokio::test]
    async fn test_malformed_page_does_not_block_others() {
        let backend = Arc::new(MemoryBackend::new());
        backend.seed_page("faq", json!("{broken"), true);
        backend.seed_page("about", json!({"hero": {"title": "عنا"}}), true);
        let store = PagesContentStore::new(backend);

        assert_eq!(store.load().await.unwrap(), 1);
        assert_eq!(store.page_content("about")["hero"]["title"], "عنا");
        assert_eq!(store.page_content("faq"), default_page_content("faq").unwrap());
    }

    #[tokio::test]
    async fn test_inactive_rows_are_ignored() {
        let backend = Arc::new(MemoryBackend::new());
        backend.seed_page("contact", json!({"hero": {"title": "old"}}), false);
        let store = PagesContentStore::new(backend);
        store.load().await.unwrap();

        assert_eq!(store.page_content("contact"), default_page_content("contact").unwrap());
    }

    #[tokio::test]
    async fn test_update_applies_without_reload() {
        let backend = Arc::new(MemoryBackend::new());
        let store = PagesContentStore::new(backend.clone());
        let content = json!({"hero": {"title": "جديد"}, "about": {}, "stats": {}});

        store
            .update_page_content(&AdminUserId::new(1), "home", content.clone())
            .await
            .unwrap();

        assert_eq!(store.page_content("home"), content);
        assert_eq!(backend.page("home").unwrap().page_name, "الصفحة الرئيسية");
    }

    #[tokio::test]
    async fn test_update_failure_keeps_snapshot() {
        let backend = Arc::new(MemoryBackend::new());
        backend.fail_page_upserts(true);
        let store = PagesContentStore::new(backend);

        let result = store
            .update_page_content(&AdminUserId::new(1), "home", json!({"hero": {}}))
            .await;

        assert!(matches!(result, Err(SyncError::Backend(_))));
        assert_eq!(store.page_content("home"), default_page_content("home").unwrap());
    }

    #[tokio::test]
    async fn test_update_rejects_non_object() {
        let backend = Arc::new(MemoryBackend::new());
        let store = PagesContentStore::new(backend.clone());

        let result = store
            .update_page_content(&AdminUserId::new(1), "faq", json!("text"))
            .await;

        assert!(matches!(result, Err(SyncError::InvalidContent(_))));
        assert_eq!(backend.page_upserts(), 0);
    }

    #[tokio::test]
    async fn test_typed_content_falls_back_per_section() {
        let backend = Arc::new(MemoryBackend::new());
        backend.seed_page(
            "contact",
            json!({
                "hero": {"subtitle": "نرد خلال يوم"},
                "info": {"phone": {"nested": true}}
            }),
            true,
        );
        let store = PagesContentStore::new(backend);
        store.load().await.unwrap();

        let PageContent::Contact(contact) = store.typed_page_content(PageKey::Contact) else {
            panic!("expected contact content");
        };
        let defaults = ContactContent::default();
        assert_eq!(contact.hero.subtitle, "نرد خلال يوم");
        assert_eq!(contact.hero.title, defaults.hero.title);
        assert_eq!(contact.info, defaults.info);
    }

    #[test]
    fn test_page_names() {
        assert_eq!(PagesContentStore::page_name("about"), "من نحن");
        assert_eq!(PagesContentStore::page_name("careers"), "careers");
        assert_eq!(PagesContentStore::page_keys().len(), 4);
    }
}
