//! Wish favorite repository.

use std::sync::Arc;

use super::{is_unique_violation, page_offset};
use crate::entities::{WishFavorite, wish_favorite};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use wishboard_common::{AppError, AppResult};

/// Wish favorite repository for database operations.
#[derive(Clone)]
pub struct WishFavoriteRepository {
    db: Arc<DatabaseConnection>,
}

impl WishFavoriteRepository {
    /// Create a new wish favorite repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a favorite by wish and user.
    pub async fn find_by_wish_and_user(
        &self,
        wish_id: &str,
        user_id: &str,
    ) -> AppResult<Option<wish_favorite::Model>> {
        WishFavorite::find()
            .filter(wish_favorite::Column::WishId.eq(wish_id))
            .filter(wish_favorite::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a user has favorited a wish.
    pub async fn is_favorited(&self, wish_id: &str, user_id: &str) -> AppResult<bool> {
        Ok(self
            .find_by_wish_and_user(wish_id, user_id)
            .await?
            .is_some())
    }

    /// Create a favorite.
    pub async fn create(
        &self,
        model: wish_favorite::ActiveModel,
    ) -> AppResult<wish_favorite::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| {
            if is_unique_violation(&e) {
                AppError::AlreadyFavorited
            } else {
                AppError::Database(e.to_string())
            }
        })
    }

    /// Delete a favorite by wish and user.
    pub async fn delete_by_wish_and_user(&self, wish_id: &str, user_id: &str) -> AppResult<()> {
        let result = WishFavorite::delete_many()
            .filter(wish_favorite::Column::WishId.eq(wish_id))
            .filter(wish_favorite::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFavorited);
        }
        Ok(())
    }

    /// Count favorites on a wish.
    pub async fn count_by_wish(&self, wish_id: &str) -> AppResult<u64> {
        WishFavorite::find()
            .filter(wish_favorite::Column::WishId.eq(wish_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count favorites held by a user.
    pub async fn count_by_user(&self, user_id: &str) -> AppResult<u64> {
        WishFavorite::find()
            .filter(wish_favorite::Column::UserId.eq(user_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a page of a user's favorites, most recent first.
    pub async fn find_by_user(
        &self,
        user_id: &str,
        page: u64,
        page_size: u64,
    ) -> AppResult<Vec<wish_favorite::Model>> {
        WishFavorite::find()
            .filter(wish_favorite::Column::UserId.eq(user_id))
            .order_by_desc(wish_favorite::Column::CreatedAt)
            .order_by_desc(wish_favorite::Column::Id)
            .offset(page_offset(page, page_size))
            .limit(page_size)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
