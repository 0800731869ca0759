//! Wish lifecycle.
//!
//! ```text
//! draft ──publish──▶ published
//!   │                    │
//!   └──────archive───────┴──▶ archived
//! ```
//!
//! `archived` is terminal. Deletion removes the row and is not a transition.

use super::Actor;
use wishboard_db::entities::WishStatus;

/// Whether `from -> to` is a lifecycle edge.
#[must_use]
pub const fn can_transition(from: WishStatus, to: WishStatus) -> bool {
    matches!(
        (from, to),
        (WishStatus::Draft, WishStatus::Published | WishStatus::Archived)
            | (WishStatus::Published, WishStatus::Archived)
    )
}

/// Status a newly created wish is stored with.
///
/// Only an admin explicitly asking for `published` skips the draft stage.
#[must_use]
pub const fn initial_status(actor: &Actor, requested: Option<WishStatus>) -> WishStatus {
    match requested {
        Some(WishStatus::Published) if actor.is_admin() => WishStatus::Published,
        _ => WishStatus::Draft,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wishboard_db::entities::Role;

    #[test]
    fn test_transitions() {
        use WishStatus::{Archived, Draft, Published};

        assert!(can_transition(Draft, Published));
        assert!(can_transition(Draft, Archived));
        assert!(can_transition(Published, Archived));

        assert!(!can_transition(Published, Draft));
        assert!(!can_transition(Published, Published));
        assert!(!can_transition(Archived, Draft));
        assert!(!can_transition(Archived, Published));
        assert!(!can_transition(Archived, Archived));
        assert!(!can_transition(Draft, Draft));
    }

    #[test]
    fn test_non_admin_always_starts_in_draft() {
        let alice = Actor::user("alice", Role::User);
        for requested in [
            None,
            Some(WishStatus::Draft),
            Some(WishStatus::Published),
            Some(WishStatus::Archived),
        ] {
            assert_eq!(initial_status(&alice, requested), WishStatus::Draft);
        }
        assert_eq!(
            initial_status(&Actor::Anonymous, Some(WishStatus::Published)),
            WishStatus::Draft
        );
    }

    #[test]
    fn test_admin_may_create_published() {
        let admin = Actor::user("root", Role::Admin);
        assert_eq!(initial_status(&admin, None), WishStatus::Draft);
        assert_eq!(
            initial_status(&admin, Some(WishStatus::Published)),
            WishStatus::Published
        );
        assert_eq!(
            initial_status(&admin, Some(WishStatus::Archived)),
            WishStatus::Draft
        );
    }
}
