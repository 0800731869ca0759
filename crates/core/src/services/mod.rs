//! Business logic services.

#![allow(missing_docs)]

pub mod auth;
pub mod comment;
pub mod interaction;
pub mod user;
pub mod wish;
pub mod wish_favorite;
pub mod wish_like;

pub use auth::{AuthService, AuthSession};
pub use comment::{CommentInput, CommentPage, CommentService};
pub use interaction::{InteractionService, WishStats};
pub use user::{LoginInput, RegisterInput, UserService};
pub use wish::{CreateWishInput, ListWishesQuery, UpdateWishInput, WishPage, WishService};
pub use wish_favorite::WishFavoriteService;
pub use wish_like::{LikeState, WishLikeService};
