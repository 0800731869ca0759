//! Wish like repository.
//!
//! The `wish.likes` counter is denormalized from this table, so every write
//! here updates the counter inside the same transaction as the row change.

use std::sync::Arc;

use super::is_unique_violation;
use crate::entities::{Wish, WishLike, wish, wish_like};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    TransactionTrait, sea_query::Expr,
};
use wishboard_common::{AppError, AppResult};

/// Wish like repository for database operations.
#[derive(Clone)]
pub struct WishLikeRepository {
    db: Arc<DatabaseConnection>,
}

impl WishLikeRepository {
    /// Create a new wish like repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a like by wish and user.
    pub async fn find_by_wish_and_user(
        &self,
        wish_id: &str,
        user_id: &str,
    ) -> AppResult<Option<wish_like::Model>> {
        WishLike::find()
            .filter(wish_like::Column::WishId.eq(wish_id))
            .filter(wish_like::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a user has liked a wish.
    pub async fn has_liked(&self, wish_id: &str, user_id: &str) -> AppResult<bool> {
        Ok(self
            .find_by_wish_and_user(wish_id, user_id)
            .await?
            .is_some())
    }

    /// Insert a like row and increment the wish counter atomically.
    ///
    /// Returns [`AppError::AlreadyLiked`] when the unique (wish, user) index
    /// rejects the row; the counter is left untouched in that case.
    pub async fn like(&self, model: wish_like::ActiveModel) -> AppResult<wish_like::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let created = model.insert(&txn).await.map_err(|e| {
            if is_unique_violation(&e) {
                AppError::AlreadyLiked
            } else {
                AppError::Database(e.to_string())
            }
        })?;

        Wish::update_many()
            .col_expr(wish::Column::Likes, Expr::col(wish::Column::Likes).add(1))
            .filter(wish::Column::Id.eq(created.wish_id.as_str()))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(created)
    }

    /// Delete a like row and decrement the wish counter atomically.
    ///
    /// The counter is floored at zero. Returns [`AppError::NotLiked`] when no
    /// row was deleted.
    pub async fn unlike(&self, wish_id: &str, user_id: &str) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let deleted = WishLike::delete_many()
            .filter(wish_like::Column::WishId.eq(wish_id))
            .filter(wish_like::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if deleted.rows_affected == 0 {
            // Dropping the transaction rolls it back
            return Err(AppError::NotLiked);
        }

        Wish::update_many()
            .col_expr(wish::Column::Likes, Expr::cust("GREATEST(likes - 1, 0)"))
            .filter(wish::Column::Id.eq(wish_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    /// Count likes on a wish.
    pub async fn count_by_wish(&self, wish_id: &str) -> AppResult<u64> {
        WishLike::find()
            .filter(wish_like::Column::WishId.eq(wish_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
