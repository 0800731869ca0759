//! User repository.

use std::sync::Arc;

use super::is_unique_violation;
use crate::entities::{User, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};
use wishboard_common::{AppError, AppResult};

/// User repository for database operations.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<user::Model>> {
        User::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<user::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(id.to_string()))
    }

    /// Find a user by email (case-insensitive; emails are stored lowercased).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::Email.eq(email.trim().to_lowercase()))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new user.
    ///
    /// A duplicate email that races past the service-level check is reported
    /// as [`AppError::EmailExists`] via the unique index.
    pub async fn create(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| {
            if is_unique_violation(&e) {
                AppError::EmailExists
            } else {
                AppError::Database(e.to_string())
            }
        })
    }

    /// Update a user.
    pub async fn update(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count users holding the admin role.
    pub async fn count_admins(&self) -> AppResult<u64> {
        User::find()
            .filter(user::Column::Role.eq(user::Role::Admin))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::Job;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, Set};

    fn create_test_user(id: &str, email: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            name: "Test User".to_string(),
            email: email.to_string(),
            password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            role: user::Role::User,
            job: Some(Job::Development),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let user = create_test_user("user1", "alice@example.com");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_by_id("user1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.get_by_id("missing").await;

        match result {
            Err(AppError::UserNotFound(id)) => assert_eq!(id, "missing"),
            _ => panic!("Expected UserNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let user = create_test_user("user1", "alice@example.com");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_by_email("Alice@Example.com").await.unwrap();

        assert_eq!(result.unwrap().id, "user1");
    }

    #[tokio::test]
    async fn test_create_user() {
        let user = create_test_user("user1", "bob@example.com");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);

        let active = user::ActiveModel {
            id: Set("user1".to_string()),
            name: Set("Test User".to_string()),
            email: Set("bob@example.com".to_string()),
            password: Set(user.password.clone()),
            role: Set(user::Role::User),
            job: Set(None),
            ..Default::default()
        };

        let result = repo.create(active).await.unwrap();
        assert_eq!(result.email, "bob@example.com");
    }

    #[tokio::test]
    async fn test_count_admins() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(1))
                }]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        assert_eq!(repo.count_admins().await.unwrap(), 1);
    }
}
