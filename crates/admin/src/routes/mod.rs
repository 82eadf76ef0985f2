//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Health check
//! GET  /health/ready              - Database readiness
//!
//! # Settings
//! GET  /api/settings              - Merged settings and typed view
//! POST /api/settings              - Save posted keys
//! GET  /api/settings/intro-video  - Intro video settings
//! POST /api/settings/intro-video  - Save intro video settings
//!
//! # Pages
//! GET  /api/pages                 - Editable pages
//! GET  /api/pages/{key}           - Merged page content
//! PUT  /api/pages/{key}           - Replace page content
//!
//! # Dashboard
//! GET  /api/dashboard             - Product count, recent orders, stats
//! ```

pub mod dashboard;
pub mod health;
pub mod pages;
pub mod settings;

use axum::Router;
use serde::Serialize;

use kynship_content::{MSG_SAVE_FAILED, MSG_SAVED, UpdateReport};

use crate::state::AppState;

/// Toast body returned by every write endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveResponse {
    pub ok: bool,
    pub message: String,
    /// Keys that could not be saved.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<String>,
}

impl SaveResponse {
    #[must_use]
    pub fn saved() -> Self {
        Self {
            ok: true,
            message: MSG_SAVED.to_string(),
            failed: Vec::new(),
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            failed: Vec::new(),
        }
    }

    /// Partial failures still answer 200; the toast says what happened.
    #[must_use]
    pub fn from_report(report: UpdateReport) -> Self {
        if report.is_success() {
            Self::saved()
        } else {
            Self {
                failed: report.failed,
                ..Self::failed(MSG_SAVE_FAILED)
            }
        }
    }
}

/// All admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(settings::router())
        .merge(pages::router())
        .merge(dashboard::router())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_to_toast() {
        let ok = SaveResponse::from_report(UpdateReport {
            saved: vec!["site_name".to_string()],
            failed: Vec::new(),
        });
        assert_eq!(ok, SaveResponse::saved());

        let partial = SaveResponse::from_report(UpdateReport {
            saved: vec!["site_name".to_string()],
            failed: vec!["footer_text".to_string()],
        });
        assert!(!partial.ok);
        assert_eq!(partial.message, MSG_SAVE_FAILED);
        assert_eq!(partial.failed, vec!["footer_text".to_string()]);
    }

    #[test]
    fn test_saved_toast_omits_failed_list() {
        let json = serde_json::to_value(SaveResponse::saved()).unwrap_or_default();
        assert_eq!(json, serde_json::json!({"ok": true, "message": MSG_SAVED}));
    }
}
