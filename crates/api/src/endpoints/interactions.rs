//! Likes, favorites and interaction statistics for a wish.

use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;
use wishboard_common::AppResult;
use wishboard_core::{LikeState, WishStats};

use crate::{
    extractors::{AuthUser, MaybeAuthUser, Path},
    middleware::AppState,
    response::ApiResponse,
};

/// Favorite state after a favorite or unfavorite.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStateResponse {
    pub favorited: bool,
}

async fn like(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<LikeState>> {
    let like = state.like_service.like(&user.actor(), &id).await?;
    Ok(ApiResponse::ok(like))
}

async fn unlike(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<LikeState>> {
    let like = state.like_service.unlike(&user.actor(), &id).await?;
    Ok(ApiResponse::ok(like))
}

async fn favorite(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<FavoriteStateResponse>> {
    state.favorite_service.favorite(&user.actor(), &id).await?;
    Ok(ApiResponse::ok(FavoriteStateResponse { favorited: true }))
}

async fn unfavorite(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<FavoriteStateResponse>> {
    state
        .favorite_service
        .unfavorite(&user.actor(), &id)
        .await?;
    Ok(ApiResponse::ok(FavoriteStateResponse { favorited: false }))
}

/// Like, favorite and comment counts. Served for any existing wish.
async fn stats(
    user: MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<WishStats>> {
    let stats = state
        .interaction_service
        .stats(&user.actor(), &id)
        .await?;
    Ok(ApiResponse::ok(stats))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/wishes/{id}/like", post(like).delete(unlike))
        .route("/wishes/{id}/favorite", post(favorite).delete(unfavorite))
        .route("/wishes/{id}/stats", get(stats))
}
