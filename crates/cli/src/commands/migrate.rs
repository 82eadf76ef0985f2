//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! kynship-cli migrate
//! ```
//!
//! Runs the migrations in `crates/admin/migrations/`: the content tables and
//! their change triggers, the session table, and the catalog tables.

use super::{CliError, connect};

/// Run all pending migrations.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    kynship_admin::db::MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
