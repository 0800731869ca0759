//! User service.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;
use wishboard_common::{AppError, AppResult, IdGenerator, config::BootstrapConfig};
use wishboard_db::{
    entities::{Job, Role, user},
    repositories::UserRepository,
};

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for registering a new account.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    pub job: Option<Job>,
}

/// Input for logging in.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new account with the `user` role.
    pub async fn register(&self, input: RegisterInput) -> AppResult<user::Model> {
        input.validate()?;

        let email = normalize_email(&input.email);

        // Early exit; the unique index is authoritative
        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::EmailExists);
        }

        let user = self
            .insert(input.name.trim(), &email, &input.password, Role::User, input.job)
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Verify email and password.
    ///
    /// Unknown emails and wrong passwords are indistinguishable to the caller.
    pub async fn authenticate(&self, input: LoginInput) -> AppResult<user::Model> {
        input.validate()?;

        let user = self
            .user_repo
            .find_by_email(&input.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password)? {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Get a user by ID.
    pub async fn get(&self, id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }

    /// Find a user by ID.
    pub async fn find(&self, id: &str) -> AppResult<Option<user::Model>> {
        self.user_repo.find_by_id(id).await
    }

    /// Provision the configured admin account if no admin exists yet.
    ///
    /// An existing account with the configured email is promoted instead of
    /// duplicated. Returns the admin that was created or promoted, if any.
    pub async fn ensure_admin(&self, bootstrap: &BootstrapConfig) -> AppResult<Option<user::Model>> {
        if self.user_repo.count_admins().await? > 0 {
            tracing::debug!("Admin account already present, skipping provisioning");
            return Ok(None);
        }

        let email = normalize_email(&bootstrap.admin_email);

        if let Some(existing) = self.user_repo.find_by_email(&email).await? {
            let mut active: user::ActiveModel = existing.into();
            active.role = Set(Role::Admin);
            active.updated_at = Set(Utc::now().into());
            let admin = self.user_repo.update(active).await?;

            tracing::warn!(user_id = %admin.id, "Promoted existing account to admin");
            return Ok(Some(admin));
        }

        let admin = self
            .insert(
                &bootstrap.admin_name,
                &email,
                &bootstrap.admin_password,
                Role::Admin,
                None,
            )
            .await?;

        tracing::info!(user_id = %admin.id, "Provisioned admin account");
        Ok(Some(admin))
    }

    async fn insert(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
        job: Option<Job>,
    ) -> AppResult<user::Model> {
        let now = Utc::now();
        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            password: Set(hash_password(password)?),
            role: Set(role),
            job: Set(job),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        self.user_repo.create(model).await
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
