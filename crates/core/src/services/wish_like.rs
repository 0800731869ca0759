//! Wish like service.

use chrono::Utc;
use sea_orm::Set;
use serde::Serialize;
use wishboard_common::{AppError, AppResult, IdGenerator};
use wishboard_db::{
    entities::wish_like,
    repositories::{WishLikeRepository, WishRepository},
};

use super::WishService;
use crate::policy::{Actor, require_authenticated};

/// Like state after a like or unlike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeState {
    pub liked: bool,
    pub likes: i32,
}

/// Wish like service for business logic.
#[derive(Clone)]
pub struct WishLikeService {
    like_repo: WishLikeRepository,
    wish_repo: WishRepository,
    wishes: WishService,
    id_gen: IdGenerator,
}

impl WishLikeService {
    /// Create a new wish like service.
    #[must_use]
    pub const fn new(
        like_repo: WishLikeRepository,
        wish_repo: WishRepository,
        wishes: WishService,
    ) -> Self {
        Self {
            like_repo,
            wish_repo,
            wishes,
            id_gen: IdGenerator::new(),
        }
    }

    /// Like a wish.
    pub async fn like(&self, actor: &Actor, wish_id: &str) -> AppResult<LikeState> {
        let user_id = authenticated_id(actor)?;
        self.wish_repo.get_by_id(wish_id).await?;

        if self.like_repo.has_liked(wish_id, user_id).await? {
            return Err(AppError::AlreadyLiked);
        }

        let model = wish_like::ActiveModel {
            id: Set(self.id_gen.generate()),
            wish_id: Set(wish_id.to_string()),
            user_id: Set(user_id.to_string()),
            created_at: Set(Utc::now().into()),
        };
        self.like_repo.like(model).await?;
        self.wishes.invalidate_listings().await;

        tracing::debug!(wish_id = %wish_id, user_id = %user_id, "Wish liked");
        self.state(wish_id, true).await
    }

    /// Remove a like.
    pub async fn unlike(&self, actor: &Actor, wish_id: &str) -> AppResult<LikeState> {
        let user_id = authenticated_id(actor)?;
        self.wish_repo.get_by_id(wish_id).await?;

        self.like_repo.unlike(wish_id, user_id).await?;
        self.wishes.invalidate_listings().await;

        tracing::debug!(wish_id = %wish_id, user_id = %user_id, "Wish unliked");
        self.state(wish_id, false).await
    }

    async fn state(&self, wish_id: &str, liked: bool) -> AppResult<LikeState> {
        let wish = self.wish_repo.get_by_id(wish_id).await?;
        Ok(LikeState {
            liked,
            likes: wish.likes,
        })
    }
}

pub(crate) fn authenticated_id(actor: &Actor) -> AppResult<&str> {
    require_authenticated(actor).check("interactions")?;
    actor.id().ok_or(AppError::Unauthorized)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cache::WishListCache;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;
    use wishboard_db::entities::{Job, Role, WishStatus, wish};

    fn create_test_wish(id: &str, likes: i32) -> wish::Model {
        wish::Model {
            id: id.to_string(),
            title: "Dark mode".to_string(),
            description: "Please add a dark theme".to_string(),
            job: Job::Design,
            submitter: "Bob".to_string(),
            submitter_id: Some("bob".to_string()),
            status: WishStatus::Published,
            likes,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn create_test_like(wish_id: &str, user_id: &str) -> wish_like::Model {
        wish_like::Model {
            id: "like1".to_string(),
            wish_id: wish_id.to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn service(db: MockDatabase) -> WishLikeService {
        let conn = Arc::new(db.into_connection());
        let wish_repo = WishRepository::new(conn.clone());
        WishLikeService::new(
            WishLikeRepository::new(conn),
            wish_repo.clone(),
            WishService::new(wish_repo, WishListCache::disabled()),
        )
    }

    fn alice() -> Actor {
        Actor::user("alice", Role::User)
    }

    #[tokio::test]
    async fn test_anonymous_cannot_like() {
        let result = service(MockDatabase::new(DatabaseBackend::Postgres))
            .like(&Actor::Anonymous, "wish1")
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_like_missing_wish() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<wish::Model>::new()]);

        assert!(matches!(
            service(db).like(&alice(), "nope").await,
            Err(AppError::WishNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_like_increments_counter() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // wish exists
            .append_query_results([[create_test_wish("wish1", 0)]])
            // not yet liked
            .append_query_results([Vec::<wish_like::Model>::new()])
            // inserted like row
            .append_query_results([[create_test_like("wish1", "alice")]])
            // counter bump
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            // reread
            .append_query_results([[create_test_wish("wish1", 1)]]);

        let state = service(db).like(&alice(), "wish1").await.unwrap();
        assert_eq!(state, LikeState { liked: true, likes: 1 });
    }

    #[tokio::test]
    async fn test_double_like_is_conflict() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_wish("wish1", 1)]])
            .append_query_results([[create_test_like("wish1", "alice")]]);

        assert!(matches!(
            service(db).like(&alice(), "wish1").await,
            Err(AppError::AlreadyLiked)
        ));
    }

    #[tokio::test]
    async fn test_unlike_never_liked() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_wish("wish1", 0)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }]);

        assert!(matches!(
            service(db).unlike(&alice(), "wish1").await,
            Err(AppError::NotLiked)
        ));
    }

    #[tokio::test]
    async fn test_unlike_decrements_counter() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_wish("wish1", 1)]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .append_query_results([[create_test_wish("wish1", 0)]]);

        let state = service(db).unlike(&alice(), "wish1").await.unwrap();
        assert_eq!(state, LikeState { liked: false, likes: 0 });
    }
}
