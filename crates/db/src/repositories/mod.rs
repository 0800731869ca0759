//! Database repositories.

pub mod comment;
pub mod user;
pub mod wish;
pub mod wish_favorite;
pub mod wish_like;

pub use comment::CommentRepository;
pub use user::UserRepository;
pub use wish::{SortOrder, WishFilter, WishRepository, WishSortKey};
pub use wish_favorite::WishFavoriteRepository;
pub use wish_like::WishLikeRepository;

use sea_orm::{DbErr, SqlErr};

/// Whether a database error is a unique index violation.
///
/// Uniqueness pre-checks in services are only early exits; this is how a
/// concurrent duplicate that slipped past them gets reported.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Number of rows to skip for a 1-based page.
pub(crate) const fn page_offset(page: u64, page_size: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(page_size)
}
