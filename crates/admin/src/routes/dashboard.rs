//! Dashboard route handler.

use axum::{Json, Router, extract::State, routing::get};
use tracing::instrument;

use crate::db::OrderRepository;
use crate::error::AppError;
use crate::middleware::RequireAdminAuth;
use crate::models::{Dashboard, RECENT_ORDER_LIMIT};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/dashboard", get(dashboard))
}

/// Product count, the latest orders and their totals.
#[instrument(skip_all)]
async fn dashboard(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Dashboard>, AppError> {
    let repo = OrderRepository::new(state.pool());
    let product_count = repo.count_products().await?;
    let orders = repo.recent_orders(RECENT_ORDER_LIMIT).await?;
    Ok(Json(Dashboard::new(product_count, orders)))
}
