//! Authentication extractors for admin.
//!
//! The session is populated by the external login flow; these extractors
//! only read the stored [`CurrentAdmin`].

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use kynship_content::{IdentityProvider, MSG_LOGIN_REQUIRED};
use kynship_core::AdminUserId;

use crate::models::{CurrentAdmin, session_keys};
use crate::routes::SaveResponse;

async fn session_admin(parts: &Parts) -> Option<CurrentAdmin> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await
        .ok()
        .flatten()
}

/// Extractor that requires admin authentication.
///
/// Rejects with 401 and the login-required toast.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(admin): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

/// Rejection for [`RequireAdminAuth`].
pub struct AdminAuthRejection;

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(SaveResponse::failed(MSG_LOGIN_REQUIRED)),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_admin(parts).await.map(Self).ok_or(AdminAuthRejection)
    }
}

/// Extractor that optionally gets the current admin.
///
/// Write handlers take this rather than [`RequireAdminAuth`] so the stores
/// themselves reject anonymous writes before any remote call.
pub struct OptionalAdminAuth(pub Option<CurrentAdmin>);

impl<S> FromRequestParts<S> for OptionalAdminAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_admin(parts).await))
    }
}

impl IdentityProvider for OptionalAdminAuth {
    fn current_user(&self) -> Option<AdminUserId> {
        self.0.as_ref().map(|admin| admin.id)
    }
}

/// Helper to set the current admin in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_auth_identity() {
        let admin = CurrentAdmin {
            id: AdminUserId::new(9),
            email: "owner@kynship.com".to_string(),
            name: "Owner".to_string(),
        };
        assert_eq!(
            OptionalAdminAuth(Some(admin)).current_user(),
            Some(AdminUserId::new(9))
        );
        assert_eq!(OptionalAdminAuth(None).current_user(), None);
    }

    #[test]
    fn test_rejection_is_unauthorized() {
        let response = AdminAuthRejection.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
