//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /health/ready           - Database readiness
//!
//! # Content
//! GET  /api/site               - Header, footer, theme, intro video
//! GET  /api/home               - Home page hero, about and stats
//! GET  /api/pages/{key}        - Typed content of one page
//! ```

pub mod home;
pub mod pages;
pub mod site;

use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::state::AppState;

/// All storefront routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/api/site", get(site::site))
        .route("/api/home", get(home::home))
        .route("/api/pages/{key}", get(pages::show))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
