//! Authentication endpoints.

use axum::{
    Router,
    extract::State,
    middleware,
    routing::{get, post},
};
use serde::Serialize;
use wishboard_common::AppResult;
use wishboard_core::{AuthSession, LoginInput, RegisterInput};
use wishboard_db::entities::{Job, Role, user};

use crate::{
    extractors::{AuthUser, Json},
    middleware::AppState,
    rate_limit::{RateLimiterState, rate_limit_login_middleware, rate_limit_register_middleware},
    response::ApiResponse,
};

/// Public view of a user. Never includes the password hash.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub job: Option<Job>,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            job: user.job,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Token plus the user it was issued for.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub user: UserResponse,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.token,
            user: session.user.into(),
        }
    }
}

/// Create an account and sign in.
async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> AppResult<ApiResponse<SessionResponse>> {
    let session = state.auth_service.register(input).await?;
    Ok(ApiResponse::created(session.into()))
}

/// Sign in with email and password.
async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<ApiResponse<SessionResponse>> {
    let session = state.auth_service.login(input).await?;
    Ok(ApiResponse::ok(session.into()))
}

/// The signed-in user.
async fn me(AuthUser(user): AuthUser) -> ApiResponse<UserResponse> {
    ApiResponse::ok(user.into())
}

pub fn router(limiters: RateLimiterState) -> Router<AppState> {
    Router::new()
        .route(
            "/register",
            post(register).layer(middleware::from_fn_with_state(
                limiters.clone(),
                rate_limit_register_middleware,
            )),
        )
        .route(
            "/login",
            post(login).layer(middleware::from_fn_with_state(
                limiters,
                rate_limit_login_middleware,
            )),
        )
        .route("/me", get(me))
}
