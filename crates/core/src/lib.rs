//! `hbnb-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod validate;

pub use entity::{Entity, Patchable, UniqueKey};
pub use error::{DomainError, DomainResult, ErrorKind};
pub use id::{AmenityId, PlaceId, ReviewId, UserId};
