//! Route-level authorization guard.
//!
//! Admin-only routes are rejected here, before the request body is decoded.
//! Ownership rules need stored state and are enforced by the facade.

use hbnb_auth::ensure_admin;
use hbnb_core::DomainError;

use crate::context::PrincipalContext;

pub fn require_admin(caller: &PrincipalContext) -> Result<(), DomainError> {
    ensure_admin(caller.principal()).map_err(DomainError::from)
}
