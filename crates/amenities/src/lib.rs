//! Amenities domain module.

pub mod amenity;

pub use amenity::{Amenity, AmenityPatch, NAME_MAX_LEN};
