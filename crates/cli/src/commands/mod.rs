//! Subcommand implementations.
//!
//! Every command reads its connection settings from the environment
//! (loading `.env` first).
//!
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `KYNSHIP_BACKUP_DIR` - Local settings backup directory (default: ./backup)

pub mod backup;
pub mod migrate;
pub mod pages;
pub mod settings;

use std::path::PathBuf;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use kynship_content::SyncError;

const DEFAULT_BACKUP_DIR: &str = "./backup";

/// Errors shared by all commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not read {0}: {1}")]
    ReadFile(PathBuf, std::io::Error),

    #[error("Unknown page: {0}")]
    UnknownPage(String),

    /// Some keys of a settings write were not saved.
    #[error("Failed to save: {}", .0.join(", "))]
    PartialSave(Vec<String>),
}

/// Database URL from the environment.
fn database_url() -> Result<SecretString, CliError> {
    dotenvy::dotenv().ok();

    std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CliError::MissingEnvVar("ADMIN_DATABASE_URL"))
}

/// Backup directory from the environment.
fn backup_dir() -> PathBuf {
    dotenvy::dotenv().ok();

    PathBuf::from(
        std::env::var("KYNSHIP_BACKUP_DIR").unwrap_or_else(|_| DEFAULT_BACKUP_DIR.to_string()),
    )
}

async fn connect() -> Result<PgPool, CliError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    Ok(kynship_admin::db::create_pool(&database_url).await?)
}

/// Print a JSON value, pretty-printed.
fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value)?;
    #[allow(clippy::print_stdout)]
    {
        println!("{text}");
    }
    Ok(())
}
