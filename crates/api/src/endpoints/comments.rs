//! Comment endpoints.

use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::{get, put},
};
use serde::Serialize;
use wishboard_common::AppResult;
use wishboard_core::CommentInput;
use wishboard_db::entities::comment;

use super::PageQuery;
use crate::{
    extractors::{AuthUser, Json, MaybeAuthUser, Path, Query},
    middleware::AppState,
    response::{ApiResponse, PageResponse, no_content},
};

/// Comment response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub wish_id: String,
    pub author: String,
    pub author_id: Option<String>,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<comment::Model> for CommentResponse {
    fn from(comment: comment::Model) -> Self {
        Self {
            id: comment.id,
            wish_id: comment.wish_id,
            author: comment.author,
            author_id: comment.author_id,
            content: comment.content,
            created_at: comment.created_at.to_rfc3339(),
            updated_at: comment.updated_at.to_rfc3339(),
        }
    }
}

/// Comments on a wish, oldest first.
async fn list(
    user: MaybeAuthUser,
    State(state): State<AppState>,
    Path(wish_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> AppResult<ApiResponse<PageResponse<CommentResponse>>> {
    let page = state
        .comment_service
        .list(&user.actor(), &wish_id, query.into())
        .await?;

    Ok(ApiResponse::ok(PageResponse {
        items: page.items.into_iter().map(Into::into).collect(),
        total: page.total,
        page: page.page,
        page_size: page.page_size,
        total_pages: page.total_pages,
    }))
}

/// Comment on a published wish.
async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Path(wish_id): Path<String>,
    Json(input): Json<CommentInput>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let comment = state
        .comment_service
        .create(&user.actor(), &user.0.name, &wish_id, input)
        .await?;
    Ok(ApiResponse::created(comment.into()))
}

/// Edit a comment.
async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CommentInput>,
) -> AppResult<ApiResponse<CommentResponse>> {
    let comment = state
        .comment_service
        .update(&user.actor(), &id, input)
        .await?;
    Ok(ApiResponse::ok(comment.into()))
}

/// Delete a comment.
async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.comment_service.delete(&user.actor(), &id).await?;
    Ok(no_content())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/wishes/{id}/comments", get(list).post(create))
        .route("/comments/{id}", put(update).delete(delete))
}
