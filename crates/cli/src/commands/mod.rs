//! CLI subcommand implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection or query error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Seeding failed.
    #[error("Seed error: {0}")]
    Seed(String),
}

/// Connect to the site database using `SITE_DATABASE_URL` (falling back to
/// `DATABASE_URL`).
pub async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("SITE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CommandError::MissingEnvVar("SITE_DATABASE_URL"))?;

    tracing::info!("Connecting to site database...");
    let pool = PgPool::connect(&database_url).await?;
    Ok(pool)
}

/// Read the bootstrap credentials from the environment.
pub fn bootstrap_credentials() -> Result<(String, SecretString), CommandError> {
    let username =
        std::env::var("ADMIN_USERNAME").map_err(|_| CommandError::MissingEnvVar("ADMIN_USERNAME"))?;
    let password =
        std::env::var("ADMIN_PASSWORD").map_err(|_| CommandError::MissingEnvVar("ADMIN_PASSWORD"))?;
    Ok((username, SecretString::from(password)))
}
