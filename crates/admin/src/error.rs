//! Unified error handling for admin.
//!
//! Every error renders as the editor's toast body `{"ok": false, "message"}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use kynship_content::{MSG_SAVE_FAILED, SyncError};

use crate::db::RepositoryError;
use crate::routes::SaveResponse;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Content store rejected or failed a write.
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request body is not the JSON the route expects.
    #[error("Invalid body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Sync(SyncError::Unauthenticated) => StatusCode::UNAUTHORIZED,
            Self::Sync(SyncError::InvalidContent(_)) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidBody(rejection) => rejection.status(),
            Self::Sync(_) | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Sync(e) => e.user_message().to_string(),
            Self::Database(_) => MSG_SAVE_FAILED.to_string(),
            Self::NotFound(_) => self.to_string(),
            Self::InvalidBody(rejection) => rejection.body_text(),
        };

        (status, Json(SaveResponse::failed(message))).into_response()
    }
}

/// Set the Sentry user context from an admin user ID.
pub fn set_sentry_user(admin_user_id: i32, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(admin_user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use kynship_content::MSG_LOGIN_REQUIRED;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("page blog".to_string());
        assert_eq!(err.to_string(), "Not found: page blog");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Sync(SyncError::Unauthenticated)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Sync(SyncError::InvalidContent("x".to_string()))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Sync(SyncError::Backend("down".to_string()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_unauthenticated_body_is_login_toast() {
        let response = AppError::Sync(SyncError::Unauthenticated).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or_default();
        assert_eq!(json["ok"], false);
        assert_eq!(json["message"], MSG_LOGIN_REQUIRED);
    }

    #[tokio::test]
    async fn test_internal_details_hidden() {
        let response = AppError::Sync(SyncError::Backend(
            "connection refused at 10.0.0.3".to_string(),
        ))
        .into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        let text = String::from_utf8_lossy(&body);
        assert!(!text.contains("10.0.0.3"));
    }
}
