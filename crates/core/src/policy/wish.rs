//! Wish ownership and role rules.

use super::{Actor, Decision, DenyReason, lifecycle::can_transition};
use wishboard_db::entities::{WishStatus, wish};

/// Operations gated on a single wish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WishOperation {
    /// View the wish.
    Read,
    /// Change title, description, job or submitter name.
    Edit,
    /// Remove the wish.
    Delete,
    /// Move a draft to published.
    Publish,
    /// Move a wish to archived.
    Archive,
}

/// The parts of a wish the policy looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WishFacts<'a> {
    /// Current lifecycle status.
    pub status: WishStatus,
    /// `None` for anonymous submissions, which have no owner.
    pub submitter_id: Option<&'a str>,
}

impl<'a> From<&'a wish::Model> for WishFacts<'a> {
    fn from(wish: &'a wish::Model) -> Self {
        Self {
            status: wish.status,
            submitter_id: wish.submitter_id.as_deref(),
        }
    }
}

/// Decide whether `actor` may perform `op` on a wish.
///
/// Admin rules are checked first, then ownership, then the rules for any
/// other authenticated user, then anonymous access.
#[must_use]
pub fn authorize(op: WishOperation, wish: WishFacts<'_>, actor: &Actor) -> Decision {
    use Decision::{Allow, Deny};
    use DenyReason::{InvalidState, PermissionDenied, Unauthorized};
    use WishOperation::{Archive, Delete, Edit, Publish, Read};

    let published = wish.status == WishStatus::Published;
    let draft = wish.status == WishStatus::Draft;

    if actor.is_admin() {
        return match op {
            Read | Edit | Delete => Allow,
            Publish if can_transition(wish.status, WishStatus::Published) => Allow,
            Archive if can_transition(wish.status, WishStatus::Archived) => Allow,
            Publish | Archive => Deny(InvalidState),
        };
    }

    if actor.is(wish.submitter_id) {
        return match op {
            Read => Allow,
            Edit | Delete if draft => Allow,
            Edit | Delete => Deny(PermissionDenied),
            Publish if draft => Allow,
            Publish => Deny(InvalidState),
            Archive => Deny(PermissionDenied),
        };
    }

    let denied = if actor.is_authenticated() {
        PermissionDenied
    } else {
        Unauthorized
    };

    match op {
        Read if published => Allow,
        _ => Deny(denied),
    }
}
