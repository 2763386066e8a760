//! Admin session repository.
//!
//! One live session per admin: issuing a new session replaces any prior ones
//! inside a single transaction, so a concurrent request can never observe a
//! window with two valid tokens for the same admin.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use doggiedon_core::AdminId;

use super::RepositoryError;

/// A stored session row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionRow {
    /// Owning admin account.
    pub admin_id: AdminId,
    /// The exact token string handed to the client.
    pub token: String,
    /// Server-side expiry; checked independently of the token's own claim.
    pub expires_at: DateTime<Utc>,
}

/// Repository for session database operations.
pub struct SessionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Delete any existing sessions for the admin and insert the new one.
    ///
    /// Runs as a single transaction so login replacement is atomic with
    /// respect to concurrent requests for the same admin.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if either statement or the commit fails.
    pub async fn replace_for_admin(
        &self,
        admin_id: AdminId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(r"DELETE FROM admin_session WHERE admin_id = $1")
            .bind(admin_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r"
            INSERT INTO admin_session (admin_id, token, expires_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(admin_id)
        .bind(token)
        .bind(expires_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Find a non-expired session holding exactly this token string.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn find_live(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<SessionRow>, RepositoryError> {
        let session = sqlx::query_as::<_, SessionRow>(
            r"
            SELECT admin_id, token, expires_at
            FROM admin_session
            WHERE token = $1 AND expires_at > $2
            ",
        )
        .bind(token)
        .bind(now)
        .fetch_optional(self.pool)
        .await?;

        Ok(session)
    }

    /// Delete all sessions holding this token string.
    ///
    /// Idempotent: deleting a token that does not exist is not an error.
    ///
    /// # Returns
    ///
    /// The number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn delete_by_token(&self, token: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query(r"DELETE FROM admin_session WHERE token = $1")
            .bind(token)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Delete all sessions belonging to the admin.
    ///
    /// # Returns
    ///
    /// The number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn delete_for_admin(&self, admin_id: AdminId) -> Result<u64, RepositoryError> {
        let result = sqlx::query(r"DELETE FROM admin_session WHERE admin_id = $1")
            .bind(admin_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
