//! HS256 token issuing and verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::claims::{JwtClaims, TokenValidationError, validate_claims};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid token")]
    InvalidToken,

    #[error(transparent)]
    Claims(#[from] TokenValidationError),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Verifies a bearer token and returns its claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, AuthError>;
}

/// Signs claims into a bearer token.
pub trait JwtIssuer: Send + Sync {
    fn issue(&self, claims: &JwtClaims) -> Result<String, AuthError>;
}

/// Shared-secret (HS256) validator.
///
/// Only the signature and algorithm are checked by `jsonwebtoken`; the time
/// window is checked by [`validate_claims`] against the caller's clock.
pub struct Hs256JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: Vec<u8>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256];
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            key: DecodingKey::from_secret(&secret),
            validation,
        }
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, AuthError> {
        let claims = decode::<JwtClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)?;
        validate_claims(&claims, now)?;
        Ok(claims)
    }
}

/// Shared-secret (HS256) issuer, the counterpart of [`Hs256JwtValidator`].
pub struct Hs256JwtIssuer {
    key: EncodingKey,
}

impl Hs256JwtIssuer {
    pub fn new(secret: Vec<u8>) -> Self {
        Self {
            key: EncodingKey::from_secret(&secret),
        }
    }
}

impl JwtIssuer for Hs256JwtIssuer {
    fn issue(&self, claims: &JwtClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use hbnb_core::UserId;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn issued_token_validates() {
        let now = Utc::now();
        let claims = JwtClaims::new(UserId::new(), true, now, Duration::minutes(10));
        let token = Hs256JwtIssuer::new(SECRET.to_vec()).issue(&claims).unwrap();

        let decoded = Hs256JwtValidator::new(SECRET.to_vec())
            .validate(&token, now)
            .unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let now = Utc::now();
        let claims = JwtClaims::new(UserId::new(), false, now, Duration::minutes(10));
        let token = Hs256JwtIssuer::new(b"other".to_vec()).issue(&claims).unwrap();

        let err = Hs256JwtValidator::new(SECRET.to_vec())
            .validate(&token, now)
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[test]
    fn expired_token_is_rejected() {
        let issued = Utc::now() - Duration::hours(3);
        let claims = JwtClaims::new(UserId::new(), false, issued, Duration::hours(1));
        let token = Hs256JwtIssuer::new(SECRET.to_vec()).issue(&claims).unwrap();

        let err = Hs256JwtValidator::new(SECRET.to_vec())
            .validate(&token, Utc::now())
            .unwrap_err();
        assert_eq!(err, AuthError::Claims(TokenValidationError::Expired));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = Hs256JwtValidator::new(SECRET.to_vec())
            .validate("not.a.token", Utc::now())
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }
}
