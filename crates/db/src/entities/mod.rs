//! Database entities.

pub mod comment;
pub mod job;
pub mod user;
pub mod wish;
pub mod wish_favorite;
pub mod wish_like;

pub use comment::Entity as Comment;
pub use job::Job;
pub use user::{Entity as User, Role};
pub use wish::{Entity as Wish, WishStatus};
pub use wish_favorite::Entity as WishFavorite;
pub use wish_like::Entity as WishLike;
