//! Site chrome built from the live settings.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::state::AppState;
use crate::views::SiteView;

/// Header, footer, theme and intro video for every page.
#[instrument(skip(state))]
pub async fn site(State(state): State<AppState>) -> Json<SiteView> {
    Json(SiteView::from_settings(&state.settings().site_settings()))
}
