//! Per-entity storage abstraction.
//!
//! A repository is a keyed store over one entity type. It guarantees that each
//! call is atomic and that [`Entity::unique_keys`] stay unique, nothing more:
//! consistency across repositories is the facade's job.

pub mod in_memory;

use hbnb_core::{DomainResult, Entity, Patchable};

pub use in_memory::InMemoryRepository;

pub trait Repository<E: Entity>: Send + Sync {
    /// Insert a new entity. Fails with `Conflict` if the id or a unique key is taken.
    fn add(&self, entity: E) -> DomainResult<E>;

    fn get(&self, id: &E::Id) -> Option<E>;

    /// All entities, oldest first.
    fn get_all(&self) -> Vec<E>;

    /// Apply `change` to a copy of the stored entity and write it back.
    ///
    /// Nothing is stored when `change` fails or the result violates a unique
    /// key. Returns the stored value. Fails with `NotFound` for unknown ids.
    fn modify(
        &self,
        id: &E::Id,
        change: &mut dyn FnMut(&mut E) -> DomainResult<()>,
    ) -> DomainResult<E>;

    fn delete(&self, id: &E::Id) -> Option<E>;

    /// First entity (oldest first) matching `predicate`.
    fn find_first(&self, predicate: &dyn Fn(&E) -> bool) -> Option<E>;

    fn count(&self) -> usize;
}

/// Typed partial updates on top of [`Repository::modify`].
pub trait RepositoryExt<E: Patchable>: Repository<E> {
    fn update(&self, id: &E::Id, patch: E::Patch) -> DomainResult<E> {
        let mut patch = Some(patch);
        self.modify(id, &mut |entity: &mut E| match patch.take() {
            Some(p) => entity.apply_patch(p),
            None => Ok(()),
        })
    }
}

impl<E: Patchable, R: Repository<E> + ?Sized> RepositoryExt<E> for R {}
