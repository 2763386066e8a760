//! Admin account types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use doggiedon_core::AdminId;

/// An admin account as stored in the database.
///
/// Deliberately excludes the password hash; credential material only moves
/// through the auth service.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Admin {
    /// Database ID.
    pub id: AdminId,
    /// Unique login name.
    pub username: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp (password changes bump this).
    pub updated_at: DateTime<Utc>,
}

/// The authenticated admin identity derived from a verified session token.
///
/// Minimal data attached to a request once its bearer token has passed both
/// signature verification and the live-session check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's database ID.
    pub id: AdminId,
    /// Admin's login name.
    pub username: String,
}
