use chrono::{DateTime, Utc};

use hbnb_auth::{JwtClaims, Principal};

/// Authenticated caller for a request (token subject + admin claim).
///
/// Inserted by the auth middleware; present on every protected route.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
    expires_at: Option<DateTime<Utc>>,
}

impl PrincipalContext {
    pub fn new(principal: Principal, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            principal,
            expires_at,
        }
    }

    pub fn from_claims(claims: &JwtClaims) -> Self {
        Self::new(
            Principal::from(claims),
            DateTime::<Utc>::from_timestamp(claims.exp, 0),
        )
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn is_admin(&self) -> bool {
        self.principal.is_admin
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}
