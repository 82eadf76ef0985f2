//! Site settings commands.
//!
//! # Usage
//!
//! ```bash
//! # Print every setting, stored values over defaults
//! kynship-cli settings show
//!
//! # Save one setting as admin 1
//! kynship-cli settings set site_name '{"ar":"كينشيب","en":"Kynship"}' --as-admin 1
//! ```
//!
//! Writes go through the same store as the admin panel, so the local backup
//! is refreshed and running servers pick the change up from the table
//! trigger.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use kynship_content::postgres::PgContentBackend;
use kynship_content::{FileBackup, SettingsStore};
use kynship_core::AdminUserId;

use super::{CliError, backup_dir, connect, print_json};

async fn load_store() -> Result<SettingsStore, CliError> {
    let pool = connect().await?;
    let store = SettingsStore::new(
        Arc::new(PgContentBackend::new(pool)),
        Arc::new(FileBackup::new(backup_dir())),
    );
    store.load().await?;
    Ok(store)
}

/// Print the merged settings.
pub async fn show() -> Result<(), CliError> {
    let store = load_store().await?;
    let all: serde_json::Map<String, Value> = store.all().into_iter().collect();
    print_json(&Value::Object(all))
}

/// Save `raw` (a JSON literal) under `key`.
pub async fn set(key: &str, raw: &str, admin: AdminUserId) -> Result<(), CliError> {
    let value = parse_value(raw)?;
    let store = load_store().await?;

    let report = store
        .update(&admin, BTreeMap::from([(key.to_string(), value)]))
        .await?;
    if !report.is_success() {
        return Err(CliError::PartialSave(report.failed));
    }

    tracing::info!("Saved setting {} as admin {}", key, admin);
    Ok(())
}

/// Parse a setting value. Anything that isn't valid JSON is taken as a
/// plain string, so `set site_logo /logo.png` works unquoted.
fn parse_value(raw: &str) -> Result<Value, CliError> {
    match serde_json::from_str(raw) {
        Ok(value) => Ok(value),
        Err(_) if !looks_like_json(raw) => Ok(Value::String(raw.to_string())),
        Err(e) => Err(e.into()),
    }
}

fn looks_like_json(raw: &str) -> bool {
    matches!(raw.trim_start().chars().next(), Some('{' | '[' | '"'))
}
