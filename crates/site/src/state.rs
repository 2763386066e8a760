//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::SiteConfig;
use crate::donors::DonorFeed;
use crate::services::token::TokenCodec;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and token codec.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    pool: PgPool,
    codec: TokenCodec,
    donors: DonorFeed,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The token codec is constructed here from the configured signing
    /// secret, so its lifecycle is tied to process startup.
    #[must_use]
    pub fn new(config: SiteConfig, pool: PgPool) -> Self {
        let codec = TokenCodec::new(&config.token_secret);
        let donors = DonorFeed::sample();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                codec,
                donors,
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the session token codec.
    #[must_use]
    pub fn codec(&self) -> &TokenCodec {
        &self.inner.codec
    }

    /// Get a reference to the recent-donors feed.
    #[must_use]
    pub fn donors(&self) -> &DonorFeed {
        &self.inner.donors
    }
}
