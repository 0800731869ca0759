//! Core business logic for wishboard.
//!
//! [`policy`] holds the pure authorization rules; [`services`] loads rows,
//! consults the policy and persists the outcome.

pub mod cache;
pub mod policy;
pub mod services;
pub mod token;

pub use cache::WishListCache;
pub use services::*;
pub use token::{Claims, TokenService};
