//! Kynship Storefront library.
//!
//! Read-only JSON API over the live site settings and page content. The
//! binary in `main.rs` wires it to Postgres and Sentry.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod views;
