//! Interaction statistics.

use serde::Serialize;
use wishboard_common::AppResult;
use wishboard_db::repositories::{
    CommentRepository, WishFavoriteRepository, WishLikeRepository, WishRepository,
};

use crate::policy::Actor;

/// Aggregate interaction counts for a wish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishStats {
    pub total_likes: u64,
    pub total_favorites: u64,
    pub total_comments: u64,
    /// Present only for authenticated actors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_liked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_favorited: Option<bool>,
}

/// Interaction statistics service.
#[derive(Clone)]
pub struct InteractionService {
    wish_repo: WishRepository,
    like_repo: WishLikeRepository,
    favorite_repo: WishFavoriteRepository,
    comment_repo: CommentRepository,
}

impl InteractionService {
    /// Create a new interaction service.
    #[must_use]
    pub const fn new(
        wish_repo: WishRepository,
        like_repo: WishLikeRepository,
        favorite_repo: WishFavoriteRepository,
        comment_repo: CommentRepository,
    ) -> Self {
        Self {
            wish_repo,
            like_repo,
            favorite_repo,
            comment_repo,
        }
    }

    /// Counts for any existing wish.
    ///
    /// Not gated on read permission: the numbers are aggregates and are
    /// served for drafts and archived wishes too.
    pub async fn stats(&self, actor: &Actor, wish_id: &str) -> AppResult<WishStats> {
        let wish = self.wish_repo.get_by_id(wish_id).await?;

        let total_favorites = self.favorite_repo.count_by_wish(wish_id).await?;
        let total_comments = self.comment_repo.count_by_wish(wish_id).await?;

        let (user_liked, user_favorited) = match actor.id() {
            Some(user_id) => (
                Some(self.like_repo.has_liked(wish_id, user_id).await?),
                Some(self.favorite_repo.is_favorited(wish_id, user_id).await?),
            ),
            None => (None, None),
        };

        Ok(WishStats {
            total_likes: u64::try_from(wish.likes).unwrap_or(0),
            total_favorites,
            total_comments,
            user_liked,
            user_favorited,
        })
    }
}
