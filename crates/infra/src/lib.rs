//! Infrastructure layer: storage engines and the application facade.

pub mod facade;
pub mod repository;

pub use facade::{
    AmenityChanges, AmenityDraft, HbnbFacade, PlaceChanges, PlaceDraft, Repositories,
    ReviewChanges, ReviewDraft, UserChanges, UserRegistration,
};
pub use repository::{InMemoryRepository, Repository, RepositoryExt};
