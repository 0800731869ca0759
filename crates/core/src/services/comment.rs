//! Comment service.

use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;
use wishboard_common::{AppResult, IdGenerator};
use wishboard_db::{
    entities::comment,
    repositories::{CommentRepository, WishRepository},
};

use crate::policy::{
    Actor, CommentOperation, PageRequest, WishFacts, WishOperation, authorize, authorize_comment,
    can_comment, total_pages,
};

/// Comment service for business logic.
#[derive(Clone)]
pub struct CommentService {
    comment_repo: CommentRepository,
    wish_repo: WishRepository,
    id_gen: IdGenerator,
}

/// Input for writing or editing a comment.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentInput {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

/// One page of comments.
#[derive(Debug, Clone)]
pub struct CommentPage {
    pub items: Vec<comment::Model>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub const fn new(comment_repo: CommentRepository, wish_repo: WishRepository) -> Self {
        Self {
            comment_repo,
            wish_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Comments on a wish the actor may read, oldest first.
    pub async fn list(
        &self,
        actor: &Actor,
        wish_id: &str,
        page: PageRequest,
    ) -> AppResult<CommentPage> {
        let wish = self.wish_repo.get_by_id(wish_id).await?;
        authorize(WishOperation::Read, WishFacts::from(&wish), actor)
            .check(&format!("wish {wish_id}"))?;

        let (items, total) = self
            .comment_repo
            .find_by_wish(wish_id, page.page, page.page_size)
            .await?;

        Ok(CommentPage {
            items,
            total,
            page: page.page,
            page_size: page.page_size,
            total_pages: total_pages(total, page.page_size),
        })
    }

    /// Comment on a published wish.
    pub async fn create(
        &self,
        actor: &Actor,
        display_name: &str,
        wish_id: &str,
        input: CommentInput,
    ) -> AppResult<comment::Model> {
        let wish = self.wish_repo.get_by_id(wish_id).await?;
        can_comment(actor, wish.status).check(wish_id)?;
        input.validate()?;

        let now = Utc::now();
        let model = comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            wish_id: Set(wish.id),
            author: Set(display_name.to_string()),
            author_id: Set(actor.id().map(ToString::to_string)),
            content: Set(input.content),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let comment = self.comment_repo.create(model).await?;

        tracing::info!(comment_id = %comment.id, wish_id = %wish_id, "Comment created");
        Ok(comment)
    }

    /// Edit a comment (author or admin).
    pub async fn update(
        &self,
        actor: &Actor,
        comment_id: &str,
        input: CommentInput,
    ) -> AppResult<comment::Model> {
        let comment = self.comment_repo.get_by_id(comment_id).await?;
        authorize_comment(CommentOperation::Edit, comment.author_id.as_deref(), actor)
            .check(&format!("comment {comment_id}"))?;
        input.validate()?;

        let mut active: comment::ActiveModel = comment.into();
        active.content = Set(input.content);
        active.updated_at = Set(Utc::now().into());

        let updated = self.comment_repo.update(active).await?;

        tracing::info!(comment_id = %comment_id, "Comment updated");
        Ok(updated)
    }

    /// Delete a comment (author or admin).
    pub async fn delete(&self, actor: &Actor, comment_id: &str) -> AppResult<()> {
        let comment = self.comment_repo.get_by_id(comment_id).await?;
        authorize_comment(CommentOperation::Delete, comment.author_id.as_deref(), actor)
            .check(&format!("comment {comment_id}"))?;

        self.comment_repo.delete(comment_id).await?;

        tracing::info!(comment_id = %comment_id, "Comment deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;
    use wishboard_common::AppError;
    use wishboard_db::entities::{Job, Role, WishStatus, wish};

    fn create_test_wish(id: &str, owner: &str, status: WishStatus) -> wish::Model {
        wish::Model {
            id: id.to_string(),
            title: "Dark mode".to_string(),
            description: "Please add a dark theme".to_string(),
            job: Job::Design,
            submitter: "Bob".to_string(),
            submitter_id: Some(owner.to_string()),
            status,
            likes: 0,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn create_test_comment(id: &str, author_id: &str, content: &str) -> comment::Model {
        comment::Model {
            id: id.to_string(),
            wish_id: "wish1".to_string(),
            author: "Alice".to_string(),
            author_id: Some(author_id.to_string()),
            content: content.to_string(),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn service(db: MockDatabase) -> CommentService {
        let conn = Arc::new(db.into_connection());
        CommentService::new(CommentRepository::new(conn.clone()), WishRepository::new(conn))
    }

    fn input(content: &str) -> CommentInput {
        CommentInput {
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_comment_on_draft_rejected_for_owner() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_wish("wish1", "alice", WishStatus::Draft)]]);

        let result = service(db)
            .create(&Actor::user("alice", Role::User), "Alice", "wish1", input("hi"))
            .await;

        match result {
            Err(AppError::WishNotPublished(id)) => assert_eq!(id, "wish1"),
            _ => panic!("Expected WishNotPublished"),
        }
    }

    #[tokio::test]
    async fn test_anonymous_cannot_comment() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_wish("wish1", "bob", WishStatus::Published)]]);

        assert!(matches!(
            service(db)
                .create(&Actor::Anonymous, "", "wish1", input("hi"))
                .await,
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_comment_edit_flow() {
        let original = create_test_comment("c1", "alice", "first");
        let edited = create_test_comment("c1", "alice", "edited");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // Alice comments on Bob's published wish
            .append_query_results([[create_test_wish("wish1", "bob", WishStatus::Published)]])
            .append_query_results([[original.clone()]])
            // Alice edits
            .append_query_results([[original.clone()]])
            .append_query_results([[edited.clone()]])
            // Carol tries
            .append_query_results([[edited.clone()]])
            // Admin edits
            .append_query_results([[edited.clone()]])
            .append_query_results([[edited]]);
        let service = service(db);

        let alice = Actor::user("alice", Role::User);
        let created = service
            .create(&alice, "Alice", "wish1", input("first"))
            .await
            .unwrap();
        assert_eq!(created.author_id.as_deref(), Some("alice"));

        let updated = service.update(&alice, "c1", input("edited")).await.unwrap();
        assert_eq!(updated.content, "edited");

        assert!(matches!(
            service
                .update(&Actor::user("carol", Role::User), "c1", input("mine now"))
                .await,
            Err(AppError::Forbidden(_))
        ));

        assert!(
            service
                .update(&Actor::user("root", Role::Admin), "c1", input("moderated"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_delete_by_author() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_comment("c1", "alice", "first")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }]);

        assert!(
            service(db)
                .delete(&Actor::user("alice", Role::User), "c1")
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_list_requires_read() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_wish("wish1", "bob", WishStatus::Draft)]]);

        assert!(matches!(
            service(db)
                .list(&Actor::user("alice", Role::User), "wish1", PageRequest::default())
                .await,
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_list_oldest_first() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_wish("wish1", "bob", WishStatus::Published)]])
            .append_query_results([[maplit::btreemap! {
                "num_items" => sea_orm::Value::BigInt(Some(2))
            }]])
            .append_query_results([[
                create_test_comment("c1", "alice", "first"),
                create_test_comment("c2", "bob", "second"),
            ]]);

        let page = service(db)
            .list(&Actor::Anonymous, "wish1", PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].content, "first");
        assert_eq!(page.total_pages, 1);
    }
}
