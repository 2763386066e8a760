//! HTTP route handlers.
//!
//! Thin marshalling layer: handlers deserialize request bodies, call into
//! the services, and serialize results. No business rules live here.

pub mod auth;
pub mod donations;
pub mod donors;
pub mod navigation;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Public
        .route("/api/navigation", get(navigation::list_public))
        .route("/api/donors", get(donors::list))
        .route("/api/donations", post(donations::submit))
        // Admin
        .route("/api/admin/login", post(auth::login))
        .route("/api/admin/logout", post(auth::logout))
        .route("/api/admin/session", get(auth::session))
        .route("/api/admin/change-password", post(auth::change_password))
        .route(
            "/api/admin/navigation",
            get(navigation::list_admin).put(navigation::replace_all),
        )
}
