//! Access token issuing and verification (HS256 JWT).

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use wishboard_common::{AppResult, config::AuthConfig};
use wishboard_db::entities::{Role, user};

/// Token claims.
///
/// `role` is informational; the authoritative role is re-read from the user
/// row on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    /// Role at issue time.
    pub role: Role,
    /// Issued at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

/// Signs and verifies access tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service from auth configuration.
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: Duration::hours(config.token_ttl_hours),
        }
    }

    /// Issue a token for a user.
    pub fn issue(&self, user: &user::Model) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Verify a token and return its claims.
    ///
    /// Bad signatures and expired tokens are reported as
    /// [`AppError::Unauthorized`](wishboard_common::AppError::Unauthorized).
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wishboard_common::AppError;

    fn auth_config(secret: &str, ttl_hours: i64) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            token_ttl_hours: ttl_hours,
        }
    }

    fn test_user() -> user::Model {
        user::Model {
            id: "user1".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: String::new(),
            role: Role::Admin,
            job: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let service = TokenService::new(&auth_config("secret", 1));
        let token = service.issue(&test_user()).unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, "user1");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let issuer = TokenService::new(&auth_config("secret", 1));
        let verifier = TokenService::new(&auth_config("other", 1));

        let token = issuer.issue(&test_user()).unwrap();
        assert!(matches!(verifier.verify(&token), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let service = TokenService::new(&auth_config("secret", -1));
        let token = service.issue(&test_user()).unwrap();

        assert!(matches!(service.verify(&token), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_garbage_is_unauthorized() {
        let service = TokenService::new(&auth_config("secret", 1));
        assert!(matches!(
            service.verify("not.a.token"),
            Err(AppError::Unauthorized)
        ));
    }
}
