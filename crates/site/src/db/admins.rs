//! Admin account repository.
//!
//! Password hashes never leave this module except through the explicit
//! `*_with_hash` lookups used by the auth service; the plain [`Admin`] model
//! carries no credential material.

use sqlx::{PgPool, Row};

use doggiedon_core::AdminId;

use super::RepositoryError;
use crate::models::admin::Admin;

/// Repository for admin account database operations.
pub struct AdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminRepository<'a> {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get an admin by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn get_by_id(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError> {
        let admin = sqlx::query_as::<_, Admin>(
            r"
            SELECT id, username, created_at, updated_at
            FROM admin
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(admin)
    }

    /// Get an admin together with their password hash, by username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn get_with_hash_by_username(
        &self,
        username: &str,
    ) -> Result<Option<(Admin, String)>, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT id, username, password_hash, created_at, updated_at
            FROM admin
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        row.map(admin_with_hash).transpose()
    }

    /// Get an admin together with their password hash, by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn get_with_hash_by_id(
        &self,
        id: AdminId,
    ) -> Result<Option<(Admin, String)>, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT id, username, password_hash, created_at, updated_at
            FROM admin
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(admin_with_hash).transpose()
    }

    /// Create an admin account if no account with that username exists.
    ///
    /// Uses `ON CONFLICT DO NOTHING` against the unique username constraint,
    /// so a concurrent duplicate attempt is a benign no-op rather than an
    /// error.
    ///
    /// # Returns
    ///
    /// `true` if a new account was created, `false` if one already existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn create_if_absent(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO admin (username, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (username) DO NOTHING
            ",
        )
        .bind(username)
        .bind(password_hash)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Store a new password hash and revoke every session for the admin.
    ///
    /// Both statements run in one transaction: a password change invalidates
    /// the admin's trust boundary, so no session issued under the old
    /// password may remain valid once the new hash is visible.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if either statement or the commit fails.
    pub async fn update_password_and_revoke_sessions(
        &self,
        id: AdminId,
        new_password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            UPDATE admin
            SET password_hash = $2, updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(new_password_hash)
        .execute(&mut *tx)
        .await?;

        sqlx::query(r"DELETE FROM admin_session WHERE admin_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

/// Split a joined row into the credential-free model and its hash.
fn admin_with_hash(row: sqlx::postgres::PgRow) -> Result<(Admin, String), RepositoryError> {
    let admin = Admin {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    };
    let hash: String = row.try_get("password_hash")?;
    Ok((admin, hash))
}
