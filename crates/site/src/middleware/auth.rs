//! Authentication extractors for admin endpoints.
//!
//! Admin identity is derived exclusively from the verified bearer token:
//! the extractor runs full session validation (signature, expiry claim, and
//! live session row) and hands the handler a [`CurrentAdmin`]. Handlers
//! never accept an admin id from the request body for privileged
//! operations.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AppError;
use crate::models::admin::CurrentAdmin;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Extractor that requires a valid admin session.
///
/// Rejects with 401 when the `Authorization: Bearer` header is missing or
/// the token fails any validation layer.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(admin): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.username)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

impl FromRequestParts<AppState> for RequireAdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_owned()))?;

        let auth = AuthService::new(state.pool(), state.codec());
        let admin = auth.validate_session(token).await.map_err(AppError::Auth)?;

        Ok(Self(admin))
    }
}

/// Extractor that optionally resolves the current admin.
///
/// Unlike `RequireAdminAuth`, this never rejects; an absent or invalid
/// token yields `None`. Store failures still surface as errors.
pub struct OptionalAdminAuth(pub Option<CurrentAdmin>);

impl FromRequestParts<AppState> for OptionalAdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(Self(None));
        };

        let auth = AuthService::new(state.pool(), state.codec());
        match auth.validate_session(token).await {
            Ok(admin) => Ok(Self(Some(admin))),
            Err(AuthError::Repository(err)) => Err(AppError::Database(err)),
            Err(_) => Ok(Self(None)),
        }
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: &str) -> Parts {
        let (parts, ()) = Request::builder()
            .uri("/api/admin/session")
            .header(AUTHORIZATION, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_extraction() {
        let parts = parts_with_auth("Bearer abc.def");
        assert_eq!(bearer_token(&parts), Some("abc.def"));
    }

    #[test]
    fn test_non_bearer_scheme_rejected() {
        let parts = parts_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_missing_header() {
        let (parts, ()) = Request::builder()
            .uri("/api/admin/session")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(bearer_token(&parts), None);
    }
}
