//! Request identity.

use wishboard_db::entities::{Role, user};

/// Who is making a request.
///
/// Absent or invalid credentials resolve to [`Actor::Anonymous`]; there is no
/// implicit fallback identity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Actor {
    /// No credentials, or credentials that did not resolve to a user.
    #[default]
    Anonymous,
    /// A signed-in user with the role currently stored for them.
    User {
        /// User id.
        id: String,
        /// Role loaded from the user row, not from the token.
        role: Role,
    },
}

impl Actor {
    /// An authenticated actor.
    pub fn user(id: impl Into<String>, role: Role) -> Self {
        Self::User {
            id: id.into(),
            role,
        }
    }

    /// Whether the actor holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(
            self,
            Self::User {
                role: Role::Admin,
                ..
            }
        )
    }

    /// Whether the actor is authenticated.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::User { .. })
    }

    /// The user id, if authenticated.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::User { id, .. } => Some(id),
        }
    }

    /// Whether the actor is the given user.
    #[must_use]
    pub fn is(&self, user_id: Option<&str>) -> bool {
        match (self.id(), user_id) {
            (Some(mine), Some(theirs)) => mine == theirs,
            _ => false,
        }
    }
}

impl From<&user::Model> for Actor {
    fn from(user: &user::Model) -> Self {
        Self::user(user.id.clone(), user.role)
    }
}
