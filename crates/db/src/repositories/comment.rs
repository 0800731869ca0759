//! Comment repository.

use std::sync::Arc;

use super::page_offset;
use crate::entities::{Comment, comment};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use wishboard_common::{AppError, AppResult};

/// Comment repository for database operations.
#[derive(Clone)]
pub struct CommentRepository {
    db: Arc<DatabaseConnection>,
}

impl CommentRepository {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a comment by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<comment::Model>> {
        Comment::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a comment by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<comment::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::CommentNotFound(id.to_string()))
    }

    /// Create a new comment.
    pub async fn create(&self, model: comment::ActiveModel) -> AppResult<comment::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a comment.
    pub async fn update(&self, model: comment::ActiveModel) -> AppResult<comment::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a comment.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Comment::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Count comments on a wish.
    pub async fn count_by_wish(&self, wish_id: &str) -> AppResult<u64> {
        Comment::find()
            .filter(comment::Column::WishId.eq(wish_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a page of comments on a wish, oldest first, with the total count.
    pub async fn find_by_wish(
        &self,
        wish_id: &str,
        page: u64,
        page_size: u64,
    ) -> AppResult<(Vec<comment::Model>, u64)> {
        let total = self.count_by_wish(wish_id).await?;
        if total == 0 {
            return Ok((vec![], 0));
        }

        let items = Comment::find()
            .filter(comment::Column::WishId.eq(wish_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .offset(page_offset(page, page_size))
            .limit(page_size)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok((items, total))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_comment(id: &str, wish_id: &str, author_id: Option<&str>) -> comment::Model {
        comment::Model {
            id: id.to_string(),
            wish_id: wish_id.to_string(),
            author: "Bob".to_string(),
            author_id: author_id.map(ToString::to_string),
            content: "+1, would use daily".to_string(),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_get_by_id_found() {
        let comment = create_test_comment("c1", "wish1", Some("user1"));

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[comment.clone()]])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        let result = repo.get_by_id("c1").await.unwrap();

        assert_eq!(result.author_id.as_deref(), Some("user1"));
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<comment::Model>::new()])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);

        match repo.get_by_id("missing").await {
            Err(AppError::CommentNotFound(id)) => assert_eq!(id, "missing"),
            _ => panic!("Expected CommentNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_by_wish_with_total() {
        let c1 = create_test_comment("c1", "wish1", Some("user1"));
        let c2 = create_test_comment("c2", "wish1", None);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(2))
                }]])
                .append_query_results([[c1, c2]])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        let (items, total) = repo.find_by_wish("wish1", 1, 10).await.unwrap();

        assert_eq!(total, 2);
        assert_eq!(items[0].id, "c1");
        assert!(items[1].author_id.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = CommentRepository::new(db);
        assert!(repo.delete("c1").await.is_ok());
    }
}
