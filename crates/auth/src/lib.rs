//! `hbnb-auth` — pure authentication/authorization boundary.
//!
//! No HTTP or storage dependencies.

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod password;
pub mod principal;

pub use authorize::{AuthzError, ensure_admin, ensure_owner_or_admin};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{AuthError, Hs256JwtIssuer, Hs256JwtValidator, JwtIssuer, JwtValidator};
pub use password::{Argon2PasswordHasher, PasswordError, PasswordHasher};
pub use principal::Principal;
