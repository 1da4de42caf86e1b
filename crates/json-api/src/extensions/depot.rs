//! Depot helper extensions.

use std::any::Any;

use marketplace_app::auth::Principal;
use salvo::prelude::{Depot, StatusError};

/// Helpers for reading request-scoped values out of the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the caller resolved by the auth middleware.
    fn insert_principal(&mut self, principal: Principal);

    /// The authenticated caller, or `None` for anonymous requests.
    fn principal(&self) -> Option<Principal>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.inject(principal);
    }

    fn principal(&self) -> Option<Principal> {
        self.obtain::<Principal>().ok().copied()
    }
}

#[cfg(test)]
mod tests {
    use marketplace_app::domain::users::records::{Role, UserId};

    use super::*;

    #[test]
    fn principal_is_absent_until_inserted() {
        let mut depot = Depot::new();

        assert_eq!(depot.principal(), None);

        let principal = Principal {
            id: UserId::from_i64(7),
            role: Role::Business,
            is_staff: false,
            is_superuser: false,
        };

        depot.insert_principal(principal);

        assert_eq!(depot.principal(), Some(principal));
    }
}
