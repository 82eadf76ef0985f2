//! Home page route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use kynship_core::content::HomeContent;
use kynship_core::{PageContent, PageKey};

use crate::state::AppState;
use crate::views::HomeView;

/// Display the home page sections.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Json<HomeView> {
    let content = match state.pages().typed_page_content(PageKey::Home) {
        PageContent::Home(content) => content,
        _ => HomeContent::default(),
    };
    Json(HomeView::new(content, &state.settings().site_settings()))
}
