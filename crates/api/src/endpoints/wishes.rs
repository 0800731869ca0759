//! Wish endpoints.

use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use wishboard_common::AppResult;
use wishboard_core::{CreateWishInput, ListWishesQuery, UpdateWishInput, WishPage};
use wishboard_db::entities::{Job, WishStatus, wish};

use crate::{
    extractors::{AuthUser, Json, MaybeAuthUser, Path, Query},
    middleware::AppState,
    response::{ApiResponse, PageResponse, no_content},
};

/// Wish response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub job: Job,
    pub submitter: String,
    pub submitter_id: Option<String>,
    pub status: WishStatus,
    pub likes: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<wish::Model> for WishResponse {
    fn from(wish: wish::Model) -> Self {
        Self {
            id: wish.id,
            title: wish.title,
            description: wish.description,
            job: wish.job,
            submitter: wish.submitter,
            submitter_id: wish.submitter_id,
            status: wish.status,
            likes: wish.likes,
            created_at: wish.created_at.to_rfc3339(),
            updated_at: wish.updated_at.to_rfc3339(),
        }
    }
}

impl From<WishPage> for PageResponse<WishResponse> {
    fn from(page: WishPage) -> Self {
        Self {
            items: page.items.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

/// List and search wishes.
async fn list(
    user: MaybeAuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListWishesQuery>,
) -> AppResult<ApiResponse<PageResponse<WishResponse>>> {
    let page = state.wish_service.list(&user.actor(), query).await?;
    Ok(ApiResponse::ok(page.into()))
}

/// Create a wish.
async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateWishInput>,
) -> AppResult<ApiResponse<WishResponse>> {
    let wish = state
        .wish_service
        .create(&user.actor(), &user.0.name, input)
        .await?;
    Ok(ApiResponse::created(wish.into()))
}

/// Show a wish.
async fn show(
    user: MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<WishResponse>> {
    let wish = state.wish_service.get(&user.actor(), &id).await?;
    Ok(ApiResponse::ok(wish.into()))
}

/// Edit a wish.
async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateWishInput>,
) -> AppResult<ApiResponse<WishResponse>> {
    let wish = state
        .wish_service
        .update(&user.actor(), &id, input)
        .await?;
    Ok(ApiResponse::ok(wish.into()))
}

/// Delete a wish.
async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.wish_service.delete(&user.actor(), &id).await?;
    Ok(no_content())
}

/// Publish a draft.
async fn publish(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<WishResponse>> {
    let wish = state.wish_service.publish(&user.actor(), &id).await?;
    Ok(ApiResponse::ok(wish.into()))
}

/// Archive a wish.
async fn archive(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<WishResponse>> {
    let wish = state.wish_service.archive(&user.actor(), &id).await?;
    Ok(ApiResponse::ok(wish.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/wishes", get(list).post(create))
        .route("/wishes/{id}", get(show).put(update).delete(delete))
        .route("/wishes/{id}/publish", post(publish))
        .route("/wishes/{id}/archive", post(archive))
}
