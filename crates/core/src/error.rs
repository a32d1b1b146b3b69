//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Coarse classification of a [`DomainError`].
///
/// Transport layers map on this rather than on individual variants, so that
/// adding a variant never silently changes a status code.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Referenced entity is absent.
    NotFound,
    /// Duplicate value for a unique field.
    Conflict,
    /// Caller is authenticated but not allowed to do this.
    Forbidden,
    /// Well-typed value rejected by a field rule or a business rule.
    InvalidInput,
    /// Value of the wrong type, or an unparsable identifier.
    Malformed,
    /// Caller could not be authenticated.
    Unauthenticated,
    /// Unexpected failure in a collaborator (hashing, storage).
    Internal,
}

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, conflicts, authorization). Transport concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value had the wrong type (e.g. a string where a number is expected).
    #[error("invalid type: {0}")]
    InvalidType(String),

    /// A value failed a field rule (empty, too long, out of range, bad format).
    #[error("{0}")]
    Validation(String),

    /// A cross-entity business rule was violated.
    #[error("{0}")]
    BusinessRule(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A unique field already holds this value.
    #[error("{0}")]
    Conflict(String),

    /// The caller may not perform this action.
    #[error("{0}")]
    Forbidden(String),

    /// The caller could not be authenticated.
    #[error("{0}")]
    Unauthenticated(String),

    /// A collaborator failed unexpectedly.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_type(msg: impl Into<String>) -> Self {
        Self::InvalidType(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        Self::BusinessRule(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InvalidType(_) | DomainError::InvalidId(_) => ErrorKind::Malformed,
            DomainError::Validation(_) | DomainError::BusinessRule(_) => ErrorKind::InvalidInput,
            DomainError::NotFound(_) => ErrorKind::NotFound,
            DomainError::Conflict(_) => ErrorKind::Conflict,
            DomainError::Forbidden(_) => ErrorKind::Forbidden,
            DomainError::Unauthenticated(_) => ErrorKind::Unauthenticated,
            DomainError::Internal(_) => ErrorKind::Internal,
        }
    }
}
