//! API endpoints.

#![allow(missing_docs)]

mod auth;
mod comments;
mod favorites;
mod health;
mod interactions;
mod wishes;

use axum::Router;
use serde::Deserialize;
use wishboard_core::policy::PageRequest;

use crate::middleware::AppState;
use crate::rate_limit::RateLimiterState;

/// Create the API router.
pub fn router(limiters: RateLimiterState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router(limiters))
        .merge(wishes::router())
        .merge(interactions::router())
        .merge(comments::router())
        .nest("/favorites", favorites::router())
        .nest("/health", health::router())
}

/// `page` / `pageSize` query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl From<PageQuery> for PageRequest {
    fn from(query: PageQuery) -> Self {
        Self::new(query.page, query.page_size)
    }
}
