//! Wish favorite service.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::Set;
use wishboard_common::{AppError, AppResult, IdGenerator};
use wishboard_db::{
    entities::{wish, wish_favorite},
    repositories::{WishFavoriteRepository, WishRepository},
};

use super::wish::WishPage;
use super::wish_like::authenticated_id;
use crate::policy::{Actor, PageRequest, WishFacts, WishOperation, authorize, total_pages};

/// Wish favorite service for business logic.
#[derive(Clone)]
pub struct WishFavoriteService {
    favorite_repo: WishFavoriteRepository,
    wish_repo: WishRepository,
    id_gen: IdGenerator,
}

impl WishFavoriteService {
    /// Create a new wish favorite service.
    #[must_use]
    pub const fn new(favorite_repo: WishFavoriteRepository, wish_repo: WishRepository) -> Self {
        Self {
            favorite_repo,
            wish_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Add a wish to the actor's favorites.
    pub async fn favorite(&self, actor: &Actor, wish_id: &str) -> AppResult<wish_favorite::Model> {
        let user_id = authenticated_id(actor)?;
        self.wish_repo.get_by_id(wish_id).await?;

        if self.favorite_repo.is_favorited(wish_id, user_id).await? {
            return Err(AppError::AlreadyFavorited);
        }

        let model = wish_favorite::ActiveModel {
            id: Set(self.id_gen.generate()),
            wish_id: Set(wish_id.to_string()),
            user_id: Set(user_id.to_string()),
            created_at: Set(Utc::now().into()),
        };
        let favorite = self.favorite_repo.create(model).await?;

        tracing::debug!(wish_id = %wish_id, user_id = %user_id, "Wish favorited");
        Ok(favorite)
    }

    /// Remove a wish from the actor's favorites.
    pub async fn unfavorite(&self, actor: &Actor, wish_id: &str) -> AppResult<()> {
        let user_id = authenticated_id(actor)?;
        self.wish_repo.get_by_id(wish_id).await?;

        self.favorite_repo
            .delete_by_wish_and_user(wish_id, user_id)
            .await?;

        tracing::debug!(wish_id = %wish_id, user_id = %user_id, "Wish unfavorited");
        Ok(())
    }

    /// The actor's favorites, most recently favorited first.
    ///
    /// Wishes the actor can no longer read (another user's wish moved out of
    /// `published`) are left out of `items` but still counted in `total`.
    pub async fn list(&self, actor: &Actor, page: PageRequest) -> AppResult<WishPage> {
        let user_id = authenticated_id(actor)?;

        let total = self.favorite_repo.count_by_user(user_id).await?;
        let favorites = if total == 0 {
            vec![]
        } else {
            self.favorite_repo
                .find_by_user(user_id, page.page, page.page_size)
                .await?
        };

        let ids: Vec<String> = favorites.iter().map(|f| f.wish_id.clone()).collect();
        let mut wishes: HashMap<String, wish::Model> = self
            .wish_repo
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|w| (w.id.clone(), w))
            .collect();

        let items = ids
            .iter()
            .filter_map(|id| wishes.remove(id))
            .filter(|w| authorize(WishOperation::Read, WishFacts::from(w), actor).is_allowed())
            .collect();

        Ok(WishPage {
            items,
            total,
            page: page.page,
            page_size: page.page_size,
            total_pages: total_pages(total, page.page_size),
        })
    }
}
