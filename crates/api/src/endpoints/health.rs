//! Liveness endpoint.

use axum::{Router, routing::get};
use serde::Serialize;

use crate::{middleware::AppState, response::ApiResponse};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> ApiResponse<HealthResponse> {
    ApiResponse::ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health))
}
