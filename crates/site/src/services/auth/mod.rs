//! Authentication service.
//!
//! Login, logout, session validation, and password changes for the single
//! admin role. Session validity is checked in two independent layers: the
//! token's own HMAC signature and expiry claim, and a matching live row in
//! the session table. Both must pass; the table check is what makes
//! server-side revocation (logout, password change, newer login) effective
//! against tokens whose signature is still valid.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;

use doggiedon_core::AdminId;

use crate::db::{AdminRepository, SessionRepository};
use crate::models::admin::CurrentAdmin;
use crate::services::token::TokenCodec;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// A successful login: the identity pair plus the bearer token the client
/// must present on subsequent requests.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated admin's ID.
    pub admin_id: AdminId,
    /// The authenticated admin's username.
    pub username: String,
    /// Bearer token, also persisted server-side as the session row.
    pub token: String,
}

/// Authentication service.
///
/// Stateless over a connection pool and token codec; construct per request.
pub struct AuthService<'a> {
    admins: AdminRepository<'a>,
    sessions: SessionRepository<'a>,
    codec: &'a TokenCodec,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, codec: &'a TokenCodec) -> Self {
        Self {
            admins: AdminRepository::new(pool),
            sessions: SessionRepository::new(pool),
            codec,
        }
    }

    /// Log in with username and password.
    ///
    /// On success any prior sessions for the admin are replaced by the new
    /// one in a single transaction, so at most one session is live per admin
    /// after this call commits.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is unknown or
    /// the password does not match (indistinguishable by design).
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let (admin, password_hash) = self
            .admins
            .get_with_hash_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let issued = self.codec.issue(admin.id, Utc::now());
        self.sessions
            .replace_for_admin(admin.id, &issued.token, issued.expires_at)
            .await?;

        Ok(LoginOutcome {
            admin_id: admin.id,
            username: admin.username,
            token: issued.token,
        })
    }

    /// Validate a bearer token and resolve the admin identity behind it.
    ///
    /// Both layers must pass: codec verification (signature + expiry claim)
    /// and a live session row holding this exact token string. The
    /// redundancy is intentional; neither check subsumes the other.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Token` for malformed, tampered, or expired
    /// tokens; `AuthError::SessionRevoked` if the token verifies but its
    /// session no longer exists; `AuthError::AdminNotFound` if the account
    /// was removed out from under a live session.
    pub async fn validate_session(&self, token: &str) -> Result<CurrentAdmin, AuthError> {
        let payload = self.codec.verify(token)?;

        let session = self
            .sessions
            .find_live(token, Utc::now())
            .await?
            .ok_or(AuthError::SessionRevoked)?;

        // The row's admin must match the claim; a mismatch means the token
        // was swapped onto another admin's session row.
        if session.admin_id != payload.admin_id {
            return Err(AuthError::SessionRevoked);
        }

        let admin = self
            .admins
            .get_by_id(payload.admin_id)
            .await?
            .ok_or(AuthError::AdminNotFound)?;

        Ok(CurrentAdmin {
            id: admin.id,
            username: admin.username,
        })
    }

    /// Log out: delete any session rows holding this token.
    ///
    /// Idempotent, and a token that fails verification is a no-op rather
    /// than an error: logging out twice, or with a damaged token, always
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` only if the delete itself fails.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        if self.codec.verify(token).is_err() {
            return Ok(());
        }

        self.sessions.delete_by_token(token).await?;
        Ok(())
    }

    /// Change an admin's password.
    ///
    /// The caller must supply the current password; on success the new hash
    /// is stored and every session for the admin is revoked in the same
    /// transaction, forcing a fresh login.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AdminNotFound` if the id is unknown,
    /// `AuthError::InvalidCredentials` if the current password does not
    /// match, and `AuthError::WeakPassword` if the new password is too
    /// short.
    pub async fn change_password(
        &self,
        admin_id: AdminId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let (_, password_hash) = self
            .admins
            .get_with_hash_by_id(admin_id)
            .await?
            .ok_or(AuthError::AdminNotFound)?;

        verify_password(current_password, &password_hash)?;
        validate_password(new_password)?;

        let new_hash = hash_password(new_password)?;
        self.admins
            .update_password_and_revoke_sessions(admin_id, &new_hash)
            .await?;

        Ok(())
    }
}

/// Provision the admin account from configured credentials, exactly once.
///
/// Runs as an explicit startup or `dd-cli seed` step, never inside request
/// handlers. Idempotent under concurrency: the insert races through the
/// unique username constraint and a duplicate is a benign no-op.
///
/// # Returns
///
/// `true` if the account was created, `false` if it already existed.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails and
/// `AuthError::Repository` if the insert fails.
pub async fn bootstrap_admin(
    pool: &PgPool,
    username: &str,
    password: &SecretString,
) -> Result<bool, AuthError> {
    let password_hash = hash_password(password.expose_secret())?;
    let created = AdminRepository::new(pool)
        .create_if_absent(username, &password_hash)
        .await?;

    if created {
        tracing::info!(username, "admin account provisioned");
    } else {
        tracing::debug!(username, "admin account already provisioned");
    }

    Ok(created)
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
///
/// Argon2 verification re-derives the hash and compares in constant time,
/// so the failure path does not leak which byte diverged.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(matches!(
            verify_password("wrong horse battery", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long enough").is_ok());
    }
}
