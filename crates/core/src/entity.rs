//! Entity traits: identity, uniqueness and partial updates.

use chrono::{DateTime, Utc};

use crate::error::DomainResult;

/// A value that must be unique among all stored entities of one type.
///
/// `name` identifies the constraint (e.g. `"email"`), `value` is the
/// normalized key. Storage engines enforce these on insert and update.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniqueKey {
    pub name: &'static str,
    pub value: String,
}

impl UniqueKey {
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// Entity marker + minimal interface.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display + Send + Sync;

    /// Human-readable entity name used in error messages ("User", "Place").
    const KIND: &'static str;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Values that no two stored entities may share.
    fn unique_keys(&self) -> Vec<UniqueKey> {
        Vec::new()
    }

    /// Record a modification time.
    fn touch(&mut self, at: DateTime<Utc>);
}

/// Entities that accept typed partial updates.
///
/// `apply_patch` re-validates every field present in the patch and must leave
/// `self` unchanged when it returns an error.
pub trait Patchable: Entity {
    type Patch: Send;

    fn apply_patch(&mut self, patch: Self::Patch) -> DomainResult<()>;
}
