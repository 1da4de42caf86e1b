//! Authorization policy.
//!
//! Access is decided in two phases. [`authorize`] is the request-level gate and
//! runs before anything is loaded; it only looks at the caller's identity and
//! role. [`authorize_owner`] is the object-level gate and runs after the target
//! has been loaded but before it is validated or written, so that a non-owner
//! is always refused with [`PolicyError::Forbidden`] regardless of payload.

use thiserror::Error;

use crate::{
    auth::Principal,
    domain::users::records::{Role, UserId},
};

/// Resource families guarded by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Offers with their tiers.
    Offers,

    /// Single tiers addressed directly.
    OfferDetails,

    /// Orders placed against a tier.
    Orders,

    /// Per-business order counters.
    OrderCounts,

    /// Reviews of business users.
    Reviews,
}

/// Operation requested against a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Read a collection.
    List,

    /// Read one item.
    Retrieve,

    /// Add a new item.
    Create,

    /// Change an existing item.
    Update,

    /// Remove an existing item.
    Delete,
}

/// Who may pass the request-level gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Anonymous callers allowed.
    Anyone,

    /// Any authenticated principal.
    Authenticated,

    /// Authenticated principal of the given role.
    Role(Role),

    /// Authenticated staff or superuser account.
    Elevated,
}

/// Why the policy refused a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// No principal, where one is needed.
    #[error("authentication credentials were not provided or are invalid")]
    AuthenticationRequired,

    /// Known principal without the required role, elevation or ownership.
    #[error("you do not have permission to perform this action")]
    Forbidden,
}

/// Request-level rule table.
#[must_use]
pub const fn requirement(resource: Resource, operation: Operation) -> Requirement {
    match (resource, operation) {
        (Resource::Offers, Operation::List) => Requirement::Anyone,
        (Resource::Offers, Operation::Create) => Requirement::Role(Role::Business),
        (Resource::Orders | Resource::Reviews, Operation::Create) => {
            Requirement::Role(Role::Customer)
        }
        (Resource::Orders, Operation::Delete) => Requirement::Elevated,
        _ => Requirement::Authenticated,
    }
}

/// Request-level check for operations that may be called anonymously.
///
/// # Errors
///
/// Returns [`PolicyError::AuthenticationRequired`] when the rule needs a
/// principal and none was given, or [`PolicyError::Forbidden`] when the
/// principal fails a role or elevation gate.
pub fn check(
    principal: Option<&Principal>,
    resource: Resource,
    operation: Operation,
) -> Result<(), PolicyError> {
    let requirement = requirement(resource, operation);

    if requirement == Requirement::Anyone {
        return Ok(());
    }

    let principal = principal.ok_or(PolicyError::AuthenticationRequired)?;

    let allowed = match requirement {
        Requirement::Anyone | Requirement::Authenticated => true,
        Requirement::Role(role) => principal.has_role(role),
        Requirement::Elevated => principal.is_elevated(),
    };

    if allowed {
        Ok(())
    } else {
        Err(PolicyError::Forbidden)
    }
}

/// Request-level check that also yields the authenticated principal.
///
/// # Errors
///
/// See [`check`]; additionally fails with
/// [`PolicyError::AuthenticationRequired`] for anonymous callers even on
/// public rules, since the caller needs an identity to continue.
pub fn authorize(
    principal: Option<&Principal>,
    resource: Resource,
    operation: Operation,
) -> Result<&Principal, PolicyError> {
    check(principal, resource, operation)?;

    principal.ok_or(PolicyError::AuthenticationRequired)
}

/// Object-level check: the principal must be the loaded object's owner.
///
/// # Errors
///
/// Returns [`PolicyError::Forbidden`] on mismatch.
pub fn authorize_owner(principal: &Principal, owner: UserId) -> Result<(), PolicyError> {
    if principal.id == owner {
        Ok(())
    } else {
        Err(PolicyError::Forbidden)
    }
}
