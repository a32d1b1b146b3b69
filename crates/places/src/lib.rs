//! Places domain module (rental listings).
//!
//! This crate contains the field rules for listings, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod place;

pub use place::{
    NewPlace, Place, PlacePatch, TITLE_MAX_LEN, validate_latitude, validate_longitude,
};
