//! Auth service errors.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::token::TokenError;

/// Errors returned by the authentication service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or wrong password. Deliberately one variant for
    /// both cases so responses cannot reveal whether a username exists.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The referenced admin account does not exist.
    #[error("admin not found")]
    AdminNotFound,

    /// The session token failed codec verification.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// The token verified but no matching live session row exists
    /// (revoked by logout, password change, or a newer login).
    #[error("session revoked")]
    SessionRevoked,

    /// The new password does not meet requirements.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Database operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
