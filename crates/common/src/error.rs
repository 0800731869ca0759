//! Error types for wishboard.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
///
/// Every variant maps to a stable machine-readable code (see
/// [`AppError::error_code`]) so clients can branch on the reason without
/// matching on the human-readable message.
#[derive(Debug, Error)]
pub enum AppError {
    // === Client Errors ===
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Wish not found: {0}")]
    WishNotFound(String),

    #[error("Comment not found: {0}")]
    CommentNotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Wish is not published: {0}")]
    WishNotPublished(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Wish already liked")]
    AlreadyLiked,

    #[error("Wish not liked")]
    NotLiked,

    #[error("Wish already favorited")]
    AlreadyFavorited,

    #[error("Wish not favorited")]
    NotFavorited,

    #[error("Email already registered")]
    EmailExists,

    #[error("Rate limited")]
    RateLimited,

    // === Server Errors ===
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            // 4xx Client Errors
            Self::UserNotFound(_) | Self::WishNotFound(_) | Self::CommentNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Unauthorized | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::InvalidState(_)
            | Self::WishNotPublished(_)
            | Self::Validation(_)
            | Self::NotLiked
            | Self::NotFavorited => StatusCode::BAD_REQUEST,
            Self::AlreadyLiked | Self::AlreadyFavorited | Self::EmailExists => StatusCode::CONFLICT,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,

            // 5xx Server Errors
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::WishNotFound(_) => "WISH_NOT_FOUND",
            Self::CommentNotFound(_) => "COMMENT_NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::WishNotPublished(_) => "WISH_NOT_PUBLISHED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::AlreadyLiked => "ALREADY_LIKED",
            Self::NotLiked => "NOT_LIKED",
            Self::AlreadyFavorited => "ALREADY_FAVORITED",
            Self::NotFavorited => "NOT_FAVORITED",
            Self::EmailExists => "EMAIL_EXISTS",
            Self::RateLimited => "RATE_LIMITED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error should be logged at error level.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if self.is_server_error() {
            tracing::error!(error = %self, code = code, "Server error occurred");
        } else {
            tracing::debug!(error = %self, code = code, "Client error occurred");
        }

        // Server error details stay in the log
        let message = if self.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

// === From implementations ===

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidToken
            | ErrorKind::InvalidSignature
            | ErrorKind::ExpiredSignature
            | ErrorKind::ImmatureSignature
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => Self::Unauthorized,
            _ => Self::Internal(format!("Token error: {err}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::extract::rejection::MissingJsonContentType;

    #[test]
    fn test_policy_denials_map_to_distinct_statuses() {
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::InvalidState("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::WishNotFound("w1".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_conflicts_map_to_409() {
        for err in [
            AppError::AlreadyLiked,
            AppError::AlreadyFavorited,
            AppError::EmailExists,
        ] {
            assert_eq!(err.status_code(), StatusCode::CONFLICT);
        }
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(AppError::Forbidden("x".into()).error_code(), "FORBIDDEN");
        assert_eq!(
            AppError::WishNotFound("w1".into()).error_code(),
            "WISH_NOT_FOUND"
        );
        assert_eq!(AppError::AlreadyLiked.error_code(), "ALREADY_LIKED");
        assert_eq!(AppError::NotLiked.error_code(), "NOT_LIKED");
        assert_eq!(
            AppError::WishNotPublished("w1".into()).error_code(),
            "WISH_NOT_PUBLISHED"
        );
    }

    #[test]
    fn test_server_errors() {
        assert!(AppError::Database("boom".into()).is_server_error());
        assert!(!AppError::NotFavorited.is_server_error());
    }

    #[test]
    fn test_rejections_become_validation_errors() {
        let err = AppError::from(JsonRejection::from(MissingJsonContentType::default()));

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_rate_limited_maps_to_429() {
        assert_eq!(
            AppError::RateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(AppError::RateLimited.error_code(), "RATE_LIMITED");
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let err = jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::ExpiredSignature);
        assert!(matches!(AppError::from(err), AppError::Unauthorized));
    }
}
