//! Page content editor API.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use kynship_core::PageKey;

use crate::error::{AppError, set_sentry_user};
use crate::middleware::{OptionalAdminAuth, RequireAdminAuth};
use crate::routes::SaveResponse;
use crate::state::AppState;

/// Build the pages router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pages", get(index))
        .route("/api/pages/{key}", get(show).put(update))
}

/// One entry of the page list.
#[derive(Debug, Serialize)]
pub struct PageSummary {
    pub key: PageKey,
    pub name: &'static str,
}

/// Body of `GET /api/pages/{key}`.
#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub key: PageKey,
    pub name: &'static str,
    pub content: Value,
}

fn parse_key(key: &str) -> Result<PageKey, AppError> {
    key.parse()
        .map_err(|_| AppError::NotFound(format!("page {key}")))
}

#[instrument(skip_all)]
async fn index(RequireAdminAuth(_admin): RequireAdminAuth) -> Json<Vec<PageSummary>> {
    Json(
        kynship_content::PagesContentStore::page_keys()
            .into_iter()
            .map(|(key, name)| PageSummary { key, name })
            .collect(),
    )
}

#[instrument(skip_all)]
async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<PageResponse>, AppError> {
    let page = parse_key(&key)?;
    Ok(Json(PageResponse {
        key: page,
        name: page.display_name(),
        content: state.pages().page_content(page.as_str()),
    }))
}

#[instrument(skip_all)]
async fn update(
    auth: OptionalAdminAuth,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(content): Json<Value>,
) -> Result<Json<SaveResponse>, AppError> {
    let page = parse_key(&key)?;
    if let Some(admin) = &auth.0 {
        set_sentry_user(admin.id.as_i32(), Some(&admin.email));
    }
    state
        .pages()
        .update_page_content(&auth, page.as_str(), content)
        .await?;
    Ok(Json(SaveResponse::saved()))
}
