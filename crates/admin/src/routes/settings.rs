//! Site settings editor API.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::get,
};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use kynship_core::{IntroVideoSettings, IntroVideoUpdate, SiteSettings};

use crate::error::{AppError, set_sentry_user};
use crate::middleware::{OptionalAdminAuth, RequireAdminAuth};
use crate::routes::SaveResponse;
use crate::state::AppState;

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/settings", get(show).post(update))
        .route(
            "/api/settings/intro-video",
            get(show_intro_video).post(update_intro_video),
        )
}

/// Body of `GET /api/settings`.
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    /// Every key, stored values over defaults.
    pub settings: BTreeMap<String, Value>,
    pub site: SiteSettings,
}

/// Body of `GET /api/settings/intro-video`.
#[derive(Debug, Serialize)]
pub struct IntroVideoResponse {
    #[serde(flatten)]
    pub settings: IntroVideoSettings,
    pub youtube_id: Option<String>,
}

#[instrument(skip_all)]
async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Json<SettingsResponse> {
    Json(SettingsResponse {
        settings: state.settings().all(),
        site: state.settings().site_settings(),
    })
}

#[instrument(skip_all)]
async fn update(
    auth: OptionalAdminAuth,
    State(state): State<AppState>,
    Json(values): Json<BTreeMap<String, Value>>,
) -> Result<Json<SaveResponse>, AppError> {
    if let Some(admin) = &auth.0 {
        set_sentry_user(admin.id.as_i32(), Some(&admin.email));
    }
    let report = state.settings().update(&auth, values).await?;
    Ok(Json(SaveResponse::from_report(report)))
}

#[instrument(skip_all)]
async fn show_intro_video(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Json<IntroVideoResponse> {
    let settings = IntroVideoSettings::from_map(&state.settings().all());
    Json(IntroVideoResponse {
        youtube_id: settings.youtube_id().map(str::to_string),
        settings,
    })
}

/// Saves only the fields present in the body.
#[instrument(skip_all)]
async fn update_intro_video(
    auth: OptionalAdminAuth,
    State(state): State<AppState>,
    body: Result<Json<IntroVideoUpdate>, JsonRejection>,
) -> Result<Json<SaveResponse>, AppError> {
    let Json(update) = body?;
    let report = state.settings().update(&auth, update.to_map()).await?;
    Ok(Json(SaveResponse::from_report(report)))
}
