//! Authorization and visibility rules.
//!
//! Everything in this module is synchronous and side-effect free. Services
//! load the relevant rows, ask the policy for a [`Decision`] and turn a denial
//! into an [`AppError`](wishboard_common::AppError) with [`Decision::check`].
//!
//! ```
//! use wishboard_core::policy::{Actor, WishFacts, WishOperation, authorize};
//! use wishboard_db::entities::{Role, WishStatus};
//!
//! let draft = WishFacts { status: WishStatus::Draft, submitter_id: Some("alice") };
//!
//! let owner = Actor::user("alice", Role::User);
//! let stranger = Actor::user("bob", Role::User);
//!
//! assert!(authorize(WishOperation::Edit, draft, &owner).is_allowed());
//! assert!(!authorize(WishOperation::Read, draft, &stranger).is_allowed());
//! ```

pub mod actor;
pub mod decision;
pub mod interaction;
pub mod lifecycle;
pub mod visibility;
pub mod wish;

pub use actor::Actor;
pub use decision::{Decision, DenyReason};
pub use interaction::{CommentOperation, authorize_comment, can_comment, require_authenticated};
pub use lifecycle::{can_transition, initial_status};
pub use visibility::{PageRequest, StatusPredicate, effective_status_filter, total_pages};
pub use wish::{WishFacts, WishOperation, authorize};
