//! Users domain module.
//!
//! Account records and their field rules, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod user;

pub use user::{NAME_MAX_LEN, NewUser, User, UserPatch, validate_password};
