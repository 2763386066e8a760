//! Recent-donors route handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::donors::{DEFAULT_PAGE_SIZE, DonorPage};
use crate::state::AppState;

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// `GET /api/donors?page&limit`
///
/// A pure paginated read; clamping of out-of-range values happens in the
/// feed itself.
pub async fn list(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Json<DonorPage> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);

    Json(state.donors().page(page, limit))
}
