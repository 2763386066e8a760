//! Navigation route handlers.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::db::NavigationRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::models::navigation::NavigationItem;
use crate::state::AppState;

/// Navigation list response.
#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub items: Vec<NavigationItem>,
}

/// `GET /api/navigation`
///
/// Active items in position order. A store failure on this read path falls
/// back to the built-in defaults instead of failing the caller; the public
/// site keeps rendering while the database is down.
pub async fn list_public(State(state): State<AppState>) -> Json<NavigationResponse> {
    let repo = NavigationRepository::new(state.pool());

    let items = match repo.list().await {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(error = %err, "navigation read failed, serving defaults");
            NavigationItem::defaults()
        }
    };

    let items = items.into_iter().filter(|item| item.is_active).collect();

    Json(NavigationResponse { items })
}

/// `GET /api/admin/navigation`
///
/// The full set, inactive items included, for the admin editor. No default
/// fallback here: the editor must see real store state or a real error.
pub async fn list_admin(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
) -> Result<Json<NavigationResponse>> {
    let items = NavigationRepository::new(state.pool()).list().await?;
    Ok(Json(NavigationResponse { items }))
}

/// `PUT /api/admin/navigation`
///
/// Transactionally replaces the full navigation set.
pub async fn replace_all(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Json(items): Json<Vec<NavigationItem>>,
) -> Result<Json<NavigationResponse>> {
    if let Some(bad) = items.iter().find(|item| !item.is_storable()) {
        return Err(AppError::BadRequest(format!(
            "Navigation item {:?} is missing required fields",
            bad.id
        )));
    }

    let repo = NavigationRepository::new(state.pool());
    repo.replace_all(&items).await?;

    let items = repo.list().await?;
    Ok(Json(NavigationResponse { items }))
}
