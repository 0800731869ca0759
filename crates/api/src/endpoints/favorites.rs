//! The signed-in user's favorites.

use axum::{
    Router,
    extract::State,
    routing::get,
};
use wishboard_common::AppResult;

use super::{PageQuery, wishes::WishResponse};
use crate::{
    extractors::{AuthUser, Query},
    middleware::AppState,
    response::{ApiResponse, PageResponse},
};

/// Favorited wishes, most recently favorited first.
async fn list(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<ApiResponse<PageResponse<WishResponse>>> {
    let page = state
        .favorite_service
        .list(&user.actor(), query.into())
        .await?;
    Ok(ApiResponse::ok(page.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list))
}
