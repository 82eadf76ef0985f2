//! Page content commands.
//!
//! # Usage
//!
//! ```bash
//! kynship-cli pages list
//! kynship-cli pages show home
//! kynship-cli pages set home ./home.json --as-admin 1
//! ```

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use kynship_content::PagesContentStore;
use kynship_content::postgres::PgContentBackend;
use kynship_core::{AdminUserId, PageKey};

use super::{CliError, connect, print_json};

async fn load_store() -> Result<PagesContentStore, CliError> {
    let pool = connect().await?;
    let store = PagesContentStore::new(Arc::new(PgContentBackend::new(pool)));
    store.load().await?;
    Ok(store)
}

fn parse_key(key: &str) -> Result<PageKey, CliError> {
    key.parse()
        .map_err(|_| CliError::UnknownPage(key.to_string()))
}

/// Print every editable page with its display name.
pub fn list() {
    #[allow(clippy::print_stdout)]
    {
        for (key, name) in PagesContentStore::page_keys() {
            println!("{key}\t{name}");
        }
    }
}

/// Print the merged content of one page.
pub async fn show(key: &str) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let store = load_store().await?;
    print_json(&store.page_content(key.as_str()))
}

/// Replace one page's content with the JSON object in `file`.
pub async fn set(key: &str, file: &Path, admin: AdminUserId) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let text = tokio::fs::read_to_string(file)
        .await
        .map_err(|e| CliError::ReadFile(file.to_path_buf(), e))?;
    let content: Value = serde_json::from_str(&text)?;

    let store = load_store().await?;
    store
        .update_page_content(&admin, key.as_str(), content)
        .await?;

    tracing::info!("Saved page {} as admin {}", key, admin);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key() {
        assert!(matches!(parse_key("about"), Ok(PageKey::About)));
        assert!(matches!(parse_key("blog"), Err(CliError::UnknownPage(ref k)) if k == "blog"));
    }
}
