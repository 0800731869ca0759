//! Policy outcomes.

use wishboard_common::{AppError, AppResult};

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenyReason {
    /// No identity where one is required.
    Unauthorized,
    /// Identity known but not entitled.
    PermissionDenied,
    /// The lifecycle does not allow this operation from the current status.
    InvalidState,
    /// Comments are only accepted on published wishes.
    WishNotPublished,
}

/// Result of a policy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// The operation may proceed.
    Allow,
    /// The operation is refused.
    Deny(DenyReason),
}

impl Decision {
    /// Whether the decision allows the operation.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Convert into a result. `subject` names the resource in the error
    /// message.
    pub fn check(self, subject: &str) -> AppResult<()> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(reason) => Err(reason.into_error(subject)),
        }
    }
}

impl DenyReason {
    /// Map to the application error reported to clients.
    #[must_use]
    pub fn into_error(self, subject: &str) -> AppError {
        match self {
            Self::Unauthorized => AppError::Unauthorized,
            Self::PermissionDenied => {
                AppError::Forbidden(format!("not permitted on {subject}"))
            }
            Self::InvalidState => {
                AppError::InvalidState(format!("{subject} cannot do that in its current status"))
            }
            Self::WishNotPublished => AppError::WishNotPublished(subject.to_string()),
        }
    }
}
