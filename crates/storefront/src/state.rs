//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use kynship_content::{PagesContentStore, SettingsStore};

use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The stores are read-only from
/// the storefront's side and stay current through their change listeners.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    settings: Arc<SettingsStore>,
    pages: Arc<PagesContentStore>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
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

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
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
