//! Admin authentication route handlers.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::AUTHORIZATION, HeaderMap},
};
use serde::{Deserialize, Serialize};

use doggiedon_core::AdminId;

use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::services::auth::AuthService;
use crate::state::AppState;

// =============================================================================
// Wire Types
// =============================================================================

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response: identity plus the bearer token for subsequent calls.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub admin_id: AdminId,
    pub username: String,
    pub token: String,
}

/// Authenticated-session response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub admin_id: AdminId,
    pub username: String,
}

/// Change-password request body.
///
/// The admin being changed is the one behind the verified bearer token;
/// it is never taken from the body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /api/admin/login`
///
/// Unknown usernames and wrong passwords both answer 401 with the same
/// message.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let auth = AuthService::new(state.pool(), state.codec());
    let outcome = auth.login(&req.username, &req.password).await?;

    tracing::info!(admin_id = %outcome.admin_id, "admin logged in");

    Ok(Json(LoginResponse {
        admin_id: outcome.admin_id,
        username: outcome.username,
        token: outcome.token,
    }))
}

/// `POST /api/admin/logout`
///
/// Idempotent: always 204, with or without a (valid) bearer token.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<StatusCode> {
    if let Some(token) = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
    {
        let auth = AuthService::new(state.pool(), state.codec());
        auth.logout(token).await?;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/admin/session`
///
/// Resolves the bearer token to the admin identity, or 401.
pub async fn session(RequireAdminAuth(admin): RequireAdminAuth) -> Json<SessionResponse> {
    Json(SessionResponse {
        admin_id: admin.id,
        username: admin.username,
    })
}

/// `POST /api/admin/change-password`
///
/// Requires the current password; on success every session for the admin is
/// revoked, so the caller must log in again.
pub async fn change_password(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<StatusCode> {
    let auth = AuthService::new(state.pool(), state.codec());
    auth.change_password(admin.id, &req.current_password, &req.new_password)
        .await?;

    tracing::info!(admin_id = %admin.id, "admin password changed, sessions revoked");

    Ok(StatusCode::NO_CONTENT)
}
