//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use kynship_content::{PagesContentStore, SettingsStore};

use crate::config::AdminConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    settings: Arc<SettingsStore>,
    pages: Arc<PagesContentStore>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: AdminConfig,
        pool: PgPool,
        settings: Arc<SettingsStore>,
        pages: Arc<PagesContentStore>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                settings,
                pages,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    #[must_use]
    pub fn settings(&self) -> &SettingsStore {
        &self.inner.settings
    }

    #[must_use]
    pub fn pages(&self) -> &PagesContentStore {
        &self.inner.pages
    }
}
