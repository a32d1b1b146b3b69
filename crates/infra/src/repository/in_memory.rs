use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::error;

use hbnb_core::{DomainError, DomainResult, Entity, UniqueKey};

use super::Repository;

#[derive(Debug)]
struct Slot<E> {
    seq: u64,
    entity: E,
}

#[derive(Debug)]
struct Store<E: Entity> {
    next_seq: u64,
    entities: HashMap<E::Id, Slot<E>>,
    unique: HashMap<UniqueKey, E::Id>,
}

/// In-memory repository for tests/dev and single-process deployments.
///
/// Unique keys are indexed and checked under the same write lock as the
/// mutation, so two concurrent inserts of the same key cannot both succeed.
#[derive(Debug)]
pub struct InMemoryRepository<E: Entity> {
    inner: RwLock<Store<E>>,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Store {
                next_seq: 0,
                entities: HashMap::new(),
                unique: HashMap::new(),
            }),
        }
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, Store<E>>> {
        self.inner
            .read()
            .map_err(|_| DomainError::internal(format!("{} store lock poisoned", E::KIND)))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Store<E>>> {
        self.inner
            .write()
            .map_err(|_| DomainError::internal(format!("{} store lock poisoned", E::KIND)))
    }

    /// Read access for the infallible lookups. A poisoned lock is logged and
    /// the lookup degrades to "nothing stored".
    fn read_or_log(&self) -> Option<RwLockReadGuard<'_, Store<E>>> {
        self.read()
            .inspect_err(|e| error!(kind = E::KIND, error = %e, "repository read failed"))
            .ok()
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Store<E> {
    /// Fails if any of `keys` is held by an entity other than `owner`.
    fn check_unique(&self, keys: &[UniqueKey], owner: &E::Id) -> DomainResult<()> {
        for key in keys {
            match self.unique.get(key) {
                Some(holder) if holder != owner => {
                    return Err(DomainError::conflict(format!(
                        "{} with this {} already exists",
                        E::KIND,
                        key.name
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn sorted(&self) -> Vec<&Slot<E>> {
        let mut slots: Vec<&Slot<E>> = self.entities.values().collect();
        slots.sort_by_key(|slot| slot.seq);
        slots
    }
}

impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    fn add(&self, entity: E) -> DomainResult<E> {
        let mut store = self.write()?;
        let id = *entity.id();
        if store.entities.contains_key(&id) {
            return Err(DomainError::conflict(format!("{} {id} already exists", E::KIND)));
        }

        let keys = entity.unique_keys();
        store.check_unique(&keys, &id)?;
        for key in keys {
            store.unique.insert(key, id);
        }

        let seq = store.next_seq;
        store.next_seq += 1;
        store.entities.insert(
            id,
            Slot {
                seq,
                entity: entity.clone(),
            },
        );
        Ok(entity)
    }

    fn get(&self, id: &E::Id) -> Option<E> {
        let store = self.read_or_log()?;
        store.entities.get(id).map(|slot| slot.entity.clone())
    }

    fn get_all(&self) -> Vec<E> {
        match self.read_or_log() {
            Some(store) => store.sorted().into_iter().map(|slot| slot.entity.clone()).collect(),
            None => vec![],
        }
    }

    fn modify(
        &self,
        id: &E::Id,
        change: &mut dyn FnMut(&mut E) -> DomainResult<()>,
    ) -> DomainResult<E> {
        let mut store = self.write()?;
        let current = store
            .entities
            .get(id)
            .map(|slot| slot.entity.clone())
            .ok_or_else(|| DomainError::not_found(format!("{} not found", E::KIND)))?;

        let mut next = current.clone();
        change(&mut next)?;
        next.touch(Utc::now());

        let new_keys = next.unique_keys();
        store.check_unique(&new_keys, id)?;
        for key in current.unique_keys() {
            store.unique.remove(&key);
        }
        for key in new_keys {
            store.unique.insert(key, *id);
        }

        if let Some(slot) = store.entities.get_mut(id) {
            slot.entity = next.clone();
        }
        Ok(next)
    }

    fn delete(&self, id: &E::Id) -> Option<E> {
        let mut store = self
            .write()
            .inspect_err(|e| error!(kind = E::KIND, error = %e, "repository delete failed"))
            .ok()?;
        let slot = store.entities.remove(id)?;
        for key in slot.entity.unique_keys() {
            store.unique.remove(&key);
        }
        Some(slot.entity)
    }

    fn find_first(&self, predicate: &dyn Fn(&E) -> bool) -> Option<E> {
        let store = self.read_or_log()?;
        store
            .sorted()
            .into_iter()
            .map(|slot| &slot.entity)
            .find(|entity| predicate(entity))
            .cloned()
    }

    fn count(&self) -> usize {
        self.read_or_log().map_or(0, |store| store.entities.len())
    }
}
