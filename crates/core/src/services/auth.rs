//! Authentication: login, registration and request identity.

use serde::Serialize;
use wishboard_common::AppResult;
use wishboard_db::entities::user;

use super::user::{LoginInput, RegisterInput, UserService};
use crate::token::TokenService;

/// A signed-in user and their access token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub user: user::Model,
}

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    users: UserService,
    tokens: TokenService,
}

impl AuthService {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: UserService, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Register and sign in.
    pub async fn register(&self, input: RegisterInput) -> AppResult<AuthSession> {
        let user = self.users.register(input).await?;
        let token = self.tokens.issue(&user)?;
        Ok(AuthSession { token, user })
    }

    /// Sign in with email and password.
    pub async fn login(&self, input: LoginInput) -> AppResult<AuthSession> {
        let user = self.users.authenticate(input).await?;
        let token = self.tokens.issue(&user)?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(AuthSession { token, user })
    }

    /// Resolve a bearer token to the user it belongs to.
    ///
    /// Returns `None` for invalid or expired tokens and for deleted users.
    /// Database failures are propagated.
    pub async fn resolve(&self, token: &str) -> AppResult<Option<user::Model>> {
        let Ok(claims) = self.tokens.verify(token) else {
            tracing::debug!("Ignoring invalid access token");
            return Ok(None);
        };

        self.users.find(&claims.sub).await
    }
}
