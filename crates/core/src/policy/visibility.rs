//! List visibility and paging rules.

use super::Actor;
use wishboard_db::entities::WishStatus;

/// Default page size for listings.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Status restriction applied to a wish listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusPredicate {
    /// No restriction.
    Any,
    /// Only wishes in this status.
    Exactly(WishStatus),
}

impl StatusPredicate {
    /// The status to filter on at the store, `None` for no restriction.
    #[must_use]
    pub const fn as_status(self) -> Option<WishStatus> {
        match self {
            Self::Any => None,
            Self::Exactly(status) => Some(status),
        }
    }

}

impl From<Option<WishStatus>> for StatusPredicate {
    fn from(status: Option<WishStatus>) -> Self {
        status.map_or(Self::Any, Self::Exactly)
    }
}

/// Status predicate a listing actually runs with.
///
/// Admins get what they ask for. A non-admin listing scoped to their own
/// user id does too. Everyone else only ever sees published wishes,
/// whatever status they requested.
#[must_use]
pub fn effective_status_filter(
    actor: &Actor,
    requested: Option<WishStatus>,
    scope_user_id: Option<&str>,
) -> StatusPredicate {
    if actor.is_admin() || actor.is(scope_user_id) {
        StatusPredicate::from(requested)
    } else {
        StatusPredicate::Exactly(WishStatus::Published)
    }
}

/// A clamped 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u64,
    /// Items per page.
    pub page_size: u64,
}

impl PageRequest {
    /// Build a page request from optional client values.
    ///
    /// Page defaults to 1 and is at least 1. Page size defaults to
    /// [`DEFAULT_PAGE_SIZE`] and is clamped to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn new(page: Option<u64>, page_size: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Number of pages needed for `total` items.
#[must_use]
pub const fn total_pages(total: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wishboard_db::entities::Role;

    #[test]
    fn test_anonymous_forced_to_published() {
        for requested in [
            None,
            Some(WishStatus::Draft),
            Some(WishStatus::Published),
            Some(WishStatus::Archived),
        ] {
            assert_eq!(
                effective_status_filter(&Actor::Anonymous, requested, None),
                StatusPredicate::Exactly(WishStatus::Published)
            );
        }
    }

    #[test]
    fn test_anonymous_scope_does_not_unlock() {
        assert_eq!(
            effective_status_filter(&Actor::Anonymous, Some(WishStatus::Draft), Some("alice")),
            StatusPredicate::Exactly(WishStatus::Published)
        );
    }

    #[test]
    fn test_admin_gets_requested() {
        let admin = Actor::user("root", Role::Admin);
        assert_eq!(
            effective_status_filter(&admin, None, None),
            StatusPredicate::Any
        );
        assert_eq!(
            effective_status_filter(&admin, Some(WishStatus::Archived), Some("alice")),
            StatusPredicate::Exactly(WishStatus::Archived)
        );
    }

    #[test]
    fn test_own_scope_unlocks_own_drafts() {
        let alice = Actor::user("alice", Role::User);
        assert_eq!(
            effective_status_filter(&alice, Some(WishStatus::Draft), Some("alice")),
            StatusPredicate::Exactly(WishStatus::Draft)
        );
        assert_eq!(
            effective_status_filter(&alice, None, Some("alice")),
            StatusPredicate::Any
        );
    }

    #[test]
    fn test_other_scope_stays_published() {
        let alice = Actor::user("alice", Role::User);
        assert_eq!(
            effective_status_filter(&alice, Some(WishStatus::Draft), Some("bob")),
            StatusPredicate::Exactly(WishStatus::Published)
        );
        assert_eq!(
            effective_status_filter(&alice, Some(WishStatus::Draft), None),
            StatusPredicate::Exactly(WishStatus::Published)
        );
    }

    #[test]
    fn test_predicate_store_status() {
        assert_eq!(StatusPredicate::Any.as_status(), None);
        assert_eq!(
            StatusPredicate::Exactly(WishStatus::Published).as_status(),
            Some(WishStatus::Published)
        );
        assert_eq!(StatusPredicate::from(None), StatusPredicate::Any);
    }

    #[test]
    fn test_page_request_clamping() {
        assert_eq!(PageRequest::default(), PageRequest { page: 1, page_size: 10 });
        assert_eq!(PageRequest::new(Some(0), Some(0)), PageRequest { page: 1, page_size: 1 });
        assert_eq!(
            PageRequest::new(Some(3), Some(500)),
            PageRequest { page: 3, page_size: 100 }
        );
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 0);
    }
}
