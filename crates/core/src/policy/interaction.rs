//! Like, favorite and comment gating.

use super::{Actor, Decision, DenyReason};
use wishboard_db::entities::WishStatus;

/// Operations on an existing comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentOperation {
    Edit,
    Delete,
}

/// Allow any authenticated actor. Used for likes and favorites.
#[must_use]
pub const fn require_authenticated(actor: &Actor) -> Decision {
    if actor.is_authenticated() {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::Unauthorized)
    }
}

/// Whether `actor` may comment on a wish in `status`.
///
/// Only published wishes take comments, including for their owner and admins.
#[must_use]
pub fn can_comment(actor: &Actor, status: WishStatus) -> Decision {
    if !actor.is_authenticated() {
        return Decision::Deny(DenyReason::Unauthorized);
    }
    if status == WishStatus::Published {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::WishNotPublished)
    }
}

/// Whether `actor` may edit or delete a comment written by `author_id`.
#[must_use]
pub fn authorize_comment(_op: CommentOperation, author_id: Option<&str>, actor: &Actor) -> Decision {
    if !actor.is_authenticated() {
        Decision::Deny(DenyReason::Unauthorized)
    } else if actor.is_admin() || actor.is(author_id) {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wishboard_db::entities::Role;

    #[test]
    fn test_likes_need_identity() {
        assert_eq!(
            require_authenticated(&Actor::Anonymous),
            Decision::Deny(DenyReason::Unauthorized)
        );
        assert_eq!(
            require_authenticated(&Actor::user("alice", Role::User)),
            Decision::Allow
        );
    }

    #[test]
    fn test_comment_requires_published() {
        let owner = Actor::user("alice", Role::User);
        let admin = Actor::user("root", Role::Admin);

        for actor in [&owner, &admin] {
            assert_eq!(can_comment(actor, WishStatus::Published), Decision::Allow);
            for status in [WishStatus::Draft, WishStatus::Archived] {
                assert_eq!(
                    can_comment(actor, status),
                    Decision::Deny(DenyReason::WishNotPublished)
                );
            }
        }
    }

    #[test]
    fn test_anonymous_cannot_comment() {
        assert_eq!(
            can_comment(&Actor::Anonymous, WishStatus::Published),
            Decision::Deny(DenyReason::Unauthorized)
        );
    }

    #[test]
    fn test_comment_edit_author_or_admin() {
        let author = Actor::user("alice", Role::User);
        let other = Actor::user("carol", Role::User);
        let admin = Actor::user("root", Role::Admin);

        for op in [CommentOperation::Edit, CommentOperation::Delete] {
            assert_eq!(authorize_comment(op, Some("alice"), &author), Decision::Allow);
            assert_eq!(
                authorize_comment(op, Some("alice"), &other),
                Decision::Deny(DenyReason::PermissionDenied)
            );
            assert_eq!(authorize_comment(op, Some("alice"), &admin), Decision::Allow);
            assert_eq!(
                authorize_comment(op, Some("alice"), &Actor::Anonymous),
                Decision::Deny(DenyReason::Unauthorized)
            );
        }
    }

    #[test]
    fn test_orphaned_comment_is_admin_only() {
        let author = Actor::user("alice", Role::User);
        assert_eq!(
            authorize_comment(CommentOperation::Edit, None, &author),
            Decision::Deny(DenyReason::PermissionDenied)
        );
        assert_eq!(
            authorize_comment(CommentOperation::Delete, None, &Actor::user("root", Role::Admin)),
            Decision::Allow
        );
    }
}
