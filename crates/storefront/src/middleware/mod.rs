//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. CORS
//! 4. Security headers

pub mod cors;
pub mod security_headers;

pub use cors::cors_layer;
pub use security_headers::security_headers_middleware;
