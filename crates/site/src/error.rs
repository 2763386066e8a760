//! Unified error handling at the HTTP boundary.
//!
//! Provides a unified `AppError` type that logs server-side detail and
//! responds to the client without leaking internals. All route handlers
//! return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::donation::IntakeError;
use crate::services::auth::AuthError;
use crate::services::token::TokenError;

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Donation intake was blocked.
    #[error("Intake error: {0}")]
    Intake(#[from] IntakeError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with full detail; the client sees none of it.
        if matches!(
            self,
            Self::Database(_) | Self::Internal(_) | Self::Auth(AuthError::Repository(_))
        ) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Database(err) | Self::Auth(AuthError::Repository(err)) => match err {
                RepositoryError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Internal(_) | Self::Auth(AuthError::PasswordHash) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials
                | AuthError::Token(_)
                | AuthError::SessionRevoked => StatusCode::UNAUTHORIZED,
                AuthError::AdminNotFound => StatusCode::NOT_FOUND,
                AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
                AuthError::PasswordHash | AuthError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Intake(err) => match err {
                IntakeError::Validation(_) | IntakeError::InvalidTransition(_) => {
                    StatusCode::BAD_REQUEST
                }
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients. Invalid username
        // and wrong password collapse into one message on purpose.
        let body = match &self {
            Self::Database(err) | Self::Auth(AuthError::Repository(err)) => {
                let message = match err {
                    RepositoryError::Unavailable(_) => "Service temporarily unavailable",
                    _ => "Internal server error",
                };
                json!({ "error": message })
            }
            Self::Internal(_) => json!({ "error": "Internal server error" }),
            Self::Auth(err) => {
                let message = match err {
                    AuthError::InvalidCredentials => "Invalid username or password",
                    AuthError::Token(TokenError::Expired) => "Session expired, please log in again",
                    AuthError::Token(_) | AuthError::SessionRevoked => "Invalid session",
                    AuthError::AdminNotFound => "Admin not found",
                    AuthError::WeakPassword(msg) => {
                        return (status, Json(json!({ "error": msg }))).into_response();
                    }
                    AuthError::PasswordHash | AuthError::Repository(_) => "Internal server error",
                };
                json!({ "error": message })
            }
            Self::Intake(IntakeError::Validation(fields)) => {
                json!({ "error": "Validation failed", "fields": fields })
            }
            Self::Intake(IntakeError::InvalidTransition(state)) => {
                json!({ "error": format!("Donation is not ready for this step ({state:?})") })
            }
            Self::NotFound(what) => json!({ "error": format!("Not found: {what}") }),
            Self::Unauthorized(msg) | Self::BadRequest(msg) => json!({ "error": msg }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
