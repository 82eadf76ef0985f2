//! Kynship Admin library.
//!
//! Editor API over the site settings and page content stores, plus the
//! order dashboard. The binary in `main.rs` wires it to Postgres, sessions
//! and Sentry.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
