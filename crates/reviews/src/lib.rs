//! Reviews domain module.
//!
//! Rating rules for reviews. Cross-entity rules (no self-review, one review per
//! place) live in the facade, which can see users and places.

pub mod review;

pub use review::{
    MAX_RATING, MIN_RATING, NewReview, Review, ReviewPatch, user_place_key, validate_rating,
};
