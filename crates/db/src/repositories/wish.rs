//! Wish repository.

use std::sync::Arc;

use super::page_offset;
use crate::entities::{Job, Wish, WishStatus, wish};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
    sea_query::{Expr, Func},
};
use serde::{Deserialize, Serialize};
use wishboard_common::{AppError, AppResult};

/// Column a wish listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WishSortKey {
    #[default]
    CreatedAt,
    UpdatedAt,
    Likes,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Store-level filter for wish listings.
///
/// `status = None` means no status restriction. Callers are expected to have
/// passed the requested status through the visibility filter first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct WishFilter {
    pub status: Option<WishStatus>,
    pub job: Option<Job>,
    pub submitter_id: Option<String>,
    /// Case-insensitive substring of title or description. LIKE wildcards
    /// in it match literally.
    pub keyword: Option<String>,
    pub sort_key: WishSortKey,
    pub order: SortOrder,
}

impl WishFilter {
    fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(status) = self.status {
            condition = condition.add(wish::Column::Status.eq(status));
        }

        if let Some(job) = self.job {
            condition = condition.add(wish::Column::Job.eq(job));
        }

        if let Some(ref submitter_id) = self.submitter_id {
            condition = condition.add(wish::Column::SubmitterId.eq(submitter_id.as_str()));
        }

        if let Some(ref keyword) = self.keyword {
            let pattern = format!(
                "%{}%",
                keyword
                    .to_lowercase()
                    .replace('\\', "\\\\")
                    .replace('%', "\\%")
                    .replace('_', "\\_")
            );
            condition = condition.add(
                Condition::any()
                    .add(Expr::expr(Func::lower(Expr::col(wish::Column::Title))).like(&pattern))
                    .add(
                        Expr::expr(Func::lower(Expr::col(wish::Column::Description)))
                            .like(&pattern),
                    ),
            );
        }

        condition
    }

    fn ordered(&self, query: Select<Wish>) -> Select<Wish> {
        let column = match self.sort_key {
            WishSortKey::CreatedAt => wish::Column::CreatedAt,
            WishSortKey::UpdatedAt => wish::Column::UpdatedAt,
            WishSortKey::Likes => wish::Column::Likes,
        };

        // ULIDs sort by creation time, so the id keeps equal keys stable
        match self.order {
            SortOrder::Asc => query.order_by_asc(column).order_by_asc(wish::Column::Id),
            SortOrder::Desc => query.order_by_desc(column).order_by_desc(wish::Column::Id),
        }
    }
}

/// Wish repository for database operations.
#[derive(Clone)]
pub struct WishRepository {
    db: Arc<DatabaseConnection>,
}

impl WishRepository {
    /// Create a new wish repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a wish by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<wish::Model>> {
        Wish::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a wish by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<wish::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::WishNotFound(id.to_string()))
    }

    /// Find wishes by IDs.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<wish::Model>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        Wish::find()
            .filter(wish::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new wish.
    pub async fn create(&self, model: wish::ActiveModel) -> AppResult<wish::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a wish.
    pub async fn update(&self, model: wish::ActiveModel) -> AppResult<wish::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a wish. Likes, favorites and comments cascade.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Wish::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get one page of wishes matching a filter, with the total match count.
    pub async fn find_page(
        &self,
        filter: &WishFilter,
        page: u64,
        page_size: u64,
    ) -> AppResult<(Vec<wish::Model>, u64)> {
        let query = Wish::find().filter(filter.condition());

        let total = query
            .clone()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if total == 0 {
            return Ok((vec![], 0));
        }

        let items = filter
            .ordered(query)
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

    fn create_test_wish(id: &str, submitter_id: Option<&str>, status: WishStatus) -> wish::Model {
        wish::Model {
            id: id.to_string(),
            title: "Dark mode".to_string(),
            description: "Please add a dark theme".to_string(),
            job: Job::Design,
            submitter: "Alice".to_string(),
            submitter_id: submitter_id.map(ToString::to_string),
            status,
            likes: 0,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let wish = create_test_wish("wish1", Some("user1"), WishStatus::Draft);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[wish.clone()]])
                .into_connection(),
        );

        let repo = WishRepository::new(db);
        let result = repo.find_by_id("wish1").await.unwrap();

        assert_eq!(result.unwrap().status, WishStatus::Draft);
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<wish::Model>::new()])
                .into_connection(),
        );

        let repo = WishRepository::new(db);

        match repo.get_by_id("nonexistent").await {
            Err(AppError::WishNotFound(id)) => assert_eq!(id, "nonexistent"),
            _ => panic!("Expected WishNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_by_ids_empty_skips_query() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = WishRepository::new(db);
        let result = repo.find_by_ids(&[]).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_find_page_returns_items_and_total() {
        let w1 = create_test_wish("wish1", Some("user1"), WishStatus::Published);
        let w2 = create_test_wish("wish2", Some("user2"), WishStatus::Published);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(12))
                }]])
                .append_query_results([[w1, w2]])
                .into_connection(),
        );

        let repo = WishRepository::new(db);
        let filter = WishFilter {
            status: Some(WishStatus::Published),
            ..Default::default()
        };
        let (items, total) = repo.find_page(&filter, 2, 10).await.unwrap();

        assert_eq!(total, 12);
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_find_page_empty_skips_item_query() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(0))
                }]])
                .into_connection(),
        );

        let repo = WishRepository::new(db);
        let (items, total) = repo.find_page(&WishFilter::default(), 1, 10).await.unwrap();

        assert_eq!(total, 0);
        assert!(items.is_empty());
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

        let repo = WishRepository::new(db);
        assert!(repo.delete("wish1").await.is_ok());
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let filter = WishFilter::default();
        assert_eq!(filter.sort_key, WishSortKey::CreatedAt);
        assert_eq!(filter.order, SortOrder::Desc);
    }

    #[test]
    fn test_sort_key_wire_format() {
        assert_eq!(
            serde_json::from_str::<WishSortKey>("\"updated_at\"").unwrap(),
            WishSortKey::UpdatedAt
        );
        assert_eq!(
            serde_json::from_str::<SortOrder>("\"asc\"").unwrap(),
            SortOrder::Asc
        );
    }
}
