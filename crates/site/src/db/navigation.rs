//! Navigation item repository.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::navigation::NavigationItem;

/// Repository for navigation item database operations.
pub struct NavigationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NavigationRepository<'a> {
    /// Create a new navigation repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all navigation items ordered by position.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    pub async fn list(&self) -> Result<Vec<NavigationItem>, RepositoryError> {
        let items = sqlx::query_as::<_, NavigationItem>(
            r#"
            SELECT id, label, href, position, is_active
            FROM navigation_item
            ORDER BY position ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Replace the full navigation set transactionally.
    ///
    /// The previous set is deleted and the new one inserted in one
    /// transaction; readers either see the old set or the new set, never a
    /// partial mix.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if any statement or the commit fails.
    pub async fn replace_all(&self, items: &[NavigationItem]) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(r"DELETE FROM navigation_item")
            .execute(&mut *tx)
            .await?;

        for item in items {
            sqlx::query(
                r"
                INSERT INTO navigation_item (id, label, href, position, is_active)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(&item.id)
            .bind(&item.label)
            .bind(&item.href)
            .bind(item.position)
            .bind(item.is_active)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Insert the default navigation set if the table is empty.
    ///
    /// # Returns
    ///
    /// `true` if the defaults were inserted, `false` if items already
    /// existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if any query fails.
    pub async fn seed_defaults(&self) -> Result<bool, RepositoryError> {
        let existing = self.list().await?;
        if !existing.is_empty() {
            return Ok(false);
        }

        self.replace_all(&NavigationItem::defaults()).await?;
        Ok(true)
    }
}
