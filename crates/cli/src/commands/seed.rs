//! Database seeding command.
//!
//! # Usage
//!
//! ```bash
//! dd-cli seed
//! ```
//!
//! # Environment Variables
//!
//! - `SITE_DATABASE_URL` - `PostgreSQL` connection string
//! - `ADMIN_USERNAME` / `ADMIN_PASSWORD` - Credentials for the initial
//!   admin account
//!
//! Both steps are idempotent: the admin insert races through the unique
//! username constraint, and navigation defaults are only inserted into an
//! empty table. Running `seed` repeatedly is safe.

use doggiedon_site::db::NavigationRepository;
use doggiedon_site::services::auth::bootstrap_admin;

use super::{CommandError, bootstrap_credentials, connect};

/// Provision the admin account and the default navigation set.
///
/// # Errors
///
/// Returns `CommandError` if credentials are missing from the environment
/// or a database operation fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;
    let (username, password) = bootstrap_credentials()?;

    let created = bootstrap_admin(&pool, &username, &password)
        .await
        .map_err(|e| CommandError::Seed(e.to_string()))?;
    if created {
        tracing::info!("Admin account created");
    } else {
        tracing::info!("Admin account already exists, skipping");
    }

    let seeded = NavigationRepository::new(&pool)
        .seed_defaults()
        .await
        .map_err(|e| CommandError::Seed(e.to_string()))?;
    if seeded {
        tracing::info!("Default navigation items created");
    } else {
        tracing::info!("Navigation items already exist, skipping");
    }

    tracing::info!("Database seeded successfully");
    Ok(())
}
