//! Request extractors.
//!
//! The user extractors read the user placed in the request extensions by
//! [`auth_middleware`](crate::middleware::auth_middleware); neither touches
//! the database. The input wrappers reject malformed requests with the
//! standard error body.

use axum::{
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};
use wishboard_common::AppError;
use wishboard_core::policy::Actor;
use wishboard_db::entities::user;

/// Authenticated user extractor. Rejects anonymous requests with 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub user::Model);

impl AuthUser {
    /// The policy identity of this user.
    #[must_use]
    pub fn actor(&self) -> Actor {
        Actor::from(&self.0)
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<user::Model>()
            .cloned()
            .map(AuthUser)
            .ok_or(AppError::Unauthorized)
    }
}

/// Optional authenticated user extractor.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<user::Model>);

impl MaybeAuthUser {
    /// The policy identity of this request; anonymous without a user.
    #[must_use]
    pub fn actor(&self) -> Actor {
        self.0.as_ref().map_or(Actor::Anonymous, Actor::from)
    }
}

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<user::Model>().cloned()))
    }
}

/// JSON body extractor rejecting with `VALIDATION_ERROR`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

/// Query string extractor rejecting with `VALIDATION_ERROR`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

/// Path parameter extractor rejecting with `VALIDATION_ERROR`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);
