//! API response types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Success envelope: `{"data": ...}`.
///
/// Errors never go through this type; they are rendered by
/// [`wishboard_common::AppError`].
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip)]
    status: StatusCode,
    /// Response payload.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with a body.
    pub const fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }

    /// 201 with the created resource.
    pub const fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Empty success response.
#[must_use]
pub fn no_content() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

/// A page of items with its position in the full result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T: Serialize> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Matches across all pages.
    pub total: u64,
    /// 1-based page number.
    pub page: u64,
    /// Items per page.
    pub page_size: u64,
    /// Number of pages; 0 when nothing matched.
    pub total_pages: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::created(vec![1, 2])).unwrap();
        assert_eq!(body, serde_json::json!({ "data": [1, 2] }));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiResponse::ok(()).into_response().status(),
            StatusCode::OK
        );
        assert_eq!(
            ApiResponse::created(()).into_response().status(),
            StatusCode::CREATED
        );
        assert_eq!(
            no_content().into_response().status(),
            StatusCode::NO_CONTENT
        );
    }
}
