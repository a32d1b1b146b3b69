//! Application facade: the single entry point for every HBnB use case.
//!
//! ```text
//! API intent (create review, update place, ...)
//!   ↓
//! 1. Authorization (principal vs owner/author/admin)
//!   ↓
//! 2. Cross-entity preconditions (references exist, uniqueness, business rules)
//!   ↓
//! 3. Entity construction / patch (field validation)
//!   ↓
//! 4. Repository writes + back-reference maintenance
//! ```
//!
//! Operations that touch more than one repository run under `write_guard`, so
//! their intermediate states are never observed by another writer. The guard is
//! held for one operation only.

use std::sync::{Arc, Mutex, MutexGuard};

use hbnb_amenities::Amenity;
use hbnb_auth::PasswordHasher;
use hbnb_core::{DomainError, DomainResult, Entity};
use hbnb_places::Place;
use hbnb_reviews::Review;
use hbnb_users::User;

use crate::repository::{InMemoryRepository, Repository};

mod amenities;
mod places;
mod reviews;
mod users;

#[cfg(test)]
mod tests;

pub use amenities::{AmenityChanges, AmenityDraft};
pub use places::{PlaceChanges, PlaceDraft};
pub use reviews::{ReviewChanges, ReviewDraft};
pub use users::{UserChanges, UserRegistration};

/// The four storage engines the facade coordinates.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn Repository<User>>,
    pub places: Arc<dyn Repository<Place>>,
    pub amenities: Arc<dyn Repository<Amenity>>,
    pub reviews: Arc<dyn Repository<Review>>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryRepository::<User>::new()),
            places: Arc::new(InMemoryRepository::<Place>::new()),
            amenities: Arc::new(InMemoryRepository::<Amenity>::new()),
            reviews: Arc::new(InMemoryRepository::<Review>::new()),
        }
    }
}

pub struct HbnbFacade {
    users: Arc<dyn Repository<User>>,
    places: Arc<dyn Repository<Place>>,
    amenities: Arc<dyn Repository<Amenity>>,
    reviews: Arc<dyn Repository<Review>>,
    hasher: Arc<dyn PasswordHasher>,
    write_guard: Mutex<()>,
}

impl HbnbFacade {
    pub fn new(repos: Repositories, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            users: repos.users,
            places: repos.places,
            amenities: repos.amenities,
            reviews: repos.reviews,
            hasher,
            write_guard: Mutex::new(()),
        }
    }

    pub fn in_memory(hasher: Arc<dyn PasswordHasher>) -> Self {
        Self::new(Repositories::in_memory(), hasher)
    }

    fn exclusive(&self) -> DomainResult<MutexGuard<'_, ()>> {
        self.write_guard
            .lock()
            .map_err(|_| DomainError::internal("facade write guard poisoned"))
    }
}

/// `get` that turns absence into a `NotFound` naming the entity kind.
fn require<E: Entity>(repo: &dyn Repository<E>, id: &E::Id) -> DomainResult<E> {
    repo.get(id)
        .ok_or_else(|| DomainError::not_found(format!("{} not found", E::KIND)))
}

/// Detaching from a parent that no longer exists is a no-op.
fn ignore_missing<T>(result: DomainResult<T>) -> DomainResult<()> {
    match result {
        Ok(_) | Err(DomainError::NotFound(_)) => Ok(()),
        Err(e) => Err(e),
    }
}
