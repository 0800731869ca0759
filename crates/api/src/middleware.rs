//! API middleware.

#![allow(missing_docs)]

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use wishboard_core::{
    AuthService, CommentService, InteractionService, WishFavoriteService, WishLikeService,
    WishService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub wish_service: WishService,
    pub like_service: WishLikeService,
    pub favorite_service: WishFavoriteService,
    pub comment_service: CommentService,
    pub interaction_service: InteractionService,
}

/// Authentication middleware.
///
/// Puts the user behind a valid `Authorization: Bearer` token into the
/// request extensions. Missing, malformed or expired tokens leave the
/// request anonymous; a database failure while loading the user fails the
/// request.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string);

    if let Some(token) = token {
        match state.auth_service.resolve(&token).await {
            Ok(Some(user)) => {
                req.extensions_mut().insert(user);
            }
            Ok(None) => {}
            Err(e) => return e.into_response(),
        }
    }

    next.run(req).await
}
