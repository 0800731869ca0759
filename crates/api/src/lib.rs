//! HTTP API layer for wishboard.
//!
//! - **Endpoints**: auth, wishes, interactions, comments, favorites
//! - **Extractors**: the authenticated user and the request actor
//! - **Middleware**: bearer token resolution, rate limiting
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod rate_limit;
pub mod response;

use axum::Router;

pub use endpoints::router;
pub use middleware::AppState;
pub use rate_limit::{ApiRateLimiter, RateLimitConfig, RateLimiterState};

/// The `/api` tree with identity resolution applied, ready to serve.
pub fn app(state: AppState, limiters: RateLimiterState) -> Router {
    Router::new()
        .nest("/api", router(limiters))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ))
        .with_state(state)
}
