//! CORS for the frontend calling the storefront API.

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Build the CORS layer.
///
/// With no configured origins any origin may read; otherwise only the
/// listed ones. Origins that are not valid header values are skipped with a
/// warning.
#[must_use]
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET, Method::HEAD, Method::OPTIONS]);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|e| tracing::warn!(origin, error = %e, "Ignoring invalid CORS origin"))
                .ok()
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
