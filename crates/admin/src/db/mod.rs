//! Database operations for admin `PostgreSQL`.
//!
//! ## Tables
//!
//! - `site_settings`, `pages_content` - editable content, owned by `kynship-content`
//! - `admin.session` - Admin session storage
//! - `products`, `orders` - read by the dashboard
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/`, embedded in
//! [`MIGRATOR`], and run via:
//! ```bash
//! cargo run -p kynship-cli -- migrate
//! ```

pub mod orders;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use orders::OrderRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
