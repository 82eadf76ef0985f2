//! Editable content page route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use kynship_core::{PageContent, PageKey};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Serve the typed content of a page by key.
///
/// # Errors
///
/// Returns 404 if the key does not name a known page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<PageContent>> {
    let page: PageKey = key
        .parse()
        .map_err(|_| AppError::NotFound(format!("page {key}")))?;
    Ok(Json(state.pages().typed_page_content(page)))
}
