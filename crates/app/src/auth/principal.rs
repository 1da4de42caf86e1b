//! Authenticated principal.

use crate::domain::users::records::{Role, UserId, UserRecord};

/// The caller of an operation, resolved from an API token.
///
/// Every engine call receives an `Option<Principal>`; `None` is an anonymous
/// caller. Engines never look identity up on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub role: Role,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl Principal {
    #[must_use]
    pub const fn is_elevated(&self) -> bool {
        self.is_staff || self.is_superuser
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}

impl From<&UserRecord> for Principal {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            role: user.role,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
        }
    }
}
