use thiserror::Error;

use hbnb_core::{DomainError, UserId};

use crate::Principal;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("Admin privileges required")]
    AdminRequired,

    #[error("Unauthorized action")]
    NotOwner,
}

impl From<AuthzError> for DomainError {
    fn from(value: AuthzError) -> Self {
        DomainError::forbidden(value.to_string())
    }
}

/// Authorize an admin-only action.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn ensure_admin(principal: &Principal) -> Result<(), AuthzError> {
    if principal.is_admin {
        Ok(())
    } else {
        Err(AuthzError::AdminRequired)
    }
}

/// Authorize an action on a resource owned (or authored) by `owner`.
///
/// Admins pass regardless of ownership.
pub fn ensure_owner_or_admin(principal: &Principal, owner: UserId) -> Result<(), AuthzError> {
    if principal.is_admin || principal.user_id == owner {
        Ok(())
    } else {
        Err(AuthzError::NotOwner)
    }
}
