//! The acting principal passed into privileged operations.

use inkpress_core::AppError;
use inkpress_core::result::AppResult;
use inkpress_core::types::id::UserId;
use serde::{Deserialize, Serialize};

use super::role::UserRole;

/// An already-authenticated caller. Credentials are checked upstream; the
/// content engine only looks at the role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Account identifier.
    pub user_id: UserId,
    /// Login name, used as the author handle.
    pub username: String,
    /// Role.
    pub role: UserRole,
}

impl Principal {
    /// Create a principal.
    pub fn new(user_id: UserId, username: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
        }
    }

    /// Whether the principal may edit content.
    pub fn is_editor(&self) -> bool {
        self.role.has_at_least(&UserRole::Editor)
    }

    /// Whether the principal is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Fails with `Authorization` unless the principal holds at least `role`.
    pub fn require(&self, role: UserRole, action: &str) -> AppResult<()> {
        if self.role.has_at_least(&role) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Role '{}' is not allowed to {action}",
                self.role
            )))
        }
    }
}

/// Whether an optional caller may see unpublished content.
pub fn is_privileged(principal: Option<&Principal>) -> bool {
    principal.is_some_and(Principal::is_editor)
}
