use serde::Deserialize;
use tracing::{debug, info, warn};

use hbnb_auth::{Principal, ensure_owner_or_admin};
use hbnb_core::{DomainError, DomainResult, Entity, PlaceId, UserId, validate};
use hbnb_places::Place;
use hbnb_reviews::Review;
use hbnb_users::{NewUser, User, UserPatch, validate_password};

use super::{HbnbFacade, require};
use crate::repository::RepositoryExt;

/// Sign-up / admin user creation payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// User update payload. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

impl UserChanges {
    fn touches_credentials(&self) -> bool {
        self.email.is_some() || self.password.is_some() || self.is_admin.is_some()
    }
}

impl HbnbFacade {
    /// Register a user.
    ///
    /// The very first user becomes admin whatever `is_admin` says; later users
    /// get the requested flag.
    pub fn create_user(&self, registration: UserRegistration) -> DomainResult<User> {
        validate_password(&registration.password)?;
        let email = validate::email(&registration.email)?;
        let password_hash = self
            .hasher
            .hash(&registration.password)
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let _guard = self.exclusive()?;
        if self.find_user_by_email(&email).is_some() {
            warn!(%email, "registration rejected: email already registered");
            return Err(DomainError::conflict("Email already registered"));
        }

        let first_user = self.users.count() == 0;
        let user = User::new(NewUser {
            first_name: registration.first_name,
            last_name: registration.last_name,
            email,
            password_hash,
            is_admin: first_user || registration.is_admin,
        })?;
        let user = self.users.add(user)?;

        info!(user_id = %user.id(), is_admin = user.is_admin(), first_user, "user created");
        Ok(user)
    }

    pub fn get_user(&self, user_id: UserId) -> DomainResult<User> {
        require(self.users.as_ref(), &user_id)
    }

    pub fn get_users(&self) -> Vec<User> {
        self.users.get_all()
    }

    /// Attribute lookup by email (case-insensitive).
    pub fn get_user_by_email(&self, email: &str) -> Option<User> {
        let email = email.trim().to_lowercase();
        self.find_user_by_email(&email)
    }

    fn find_user_by_email(&self, normalized: &str) -> Option<User> {
        self.users.find_first(&|u: &User| u.email() == normalized)
    }

    /// Update a profile.
    ///
    /// Callers may edit themselves; admins may edit anyone. Only admins may
    /// change email, password or the admin flag.
    pub fn update_user(
        &self,
        caller: &Principal,
        user_id: UserId,
        changes: UserChanges,
    ) -> DomainResult<User> {
        ensure_owner_or_admin(caller, user_id)?;
        if !caller.is_admin && changes.touches_credentials() {
            return Err(DomainError::business_rule(
                "You cannot modify email or password",
            ));
        }
        require(self.users.as_ref(), &user_id)?;

        let email = match &changes.email {
            Some(raw) => {
                let email = validate::email(raw)?;
                match self.find_user_by_email(&email) {
                    Some(other) if *other.id() != user_id => {
                        return Err(DomainError::conflict("Email already in use"));
                    }
                    _ => Some(email),
                }
            }
            None => None,
        };

        let password_hash = match &changes.password {
            Some(plain) => {
                validate_password(plain)?;
                Some(
                    self.hasher
                        .hash(plain)
                        .map_err(|e| DomainError::internal(e.to_string()))?,
                )
            }
            None => None,
        };

        let user = self.users.update(
            &user_id,
            UserPatch {
                first_name: changes.first_name,
                last_name: changes.last_name,
                email,
                password_hash,
                is_admin: changes.is_admin,
            },
        )?;
        info!(user_id = %user_id, by = %caller.user_id, "user updated");
        Ok(user)
    }

    /// Check credentials. Unknown email and wrong password are indistinguishable.
    pub fn authenticate(&self, email: &str, password: &str) -> DomainResult<User> {
        let rejected = || DomainError::unauthenticated("Invalid credentials");
        let user = self.get_user_by_email(email).ok_or_else(rejected)?;
        if !self.hasher.verify(password, user.password_hash()) {
            debug!(user_id = %user.id(), "password mismatch");
            return Err(rejected());
        }
        Ok(user)
    }

    /// Seed the configured bootstrap admin unless that email is registered.
    ///
    /// Returns `None` when the account already existed.
    pub fn seed_admin(
        &self,
        registration: UserRegistration,
    ) -> DomainResult<Option<User>> {
        if self.get_user_by_email(&registration.email).is_some() {
            debug!(email = %registration.email, "bootstrap admin already present");
            return Ok(None);
        }
        let registration = UserRegistration {
            is_admin: true,
            ..registration
        };
        match self.create_user(registration) {
            Ok(user) => Ok(Some(user)),
            // Lost a race with a concurrent registration of the same address.
            Err(DomainError::Conflict(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Places owned by `user_id`, in creation order.
    pub fn get_places_by_owner(&self, user_id: UserId) -> DomainResult<Vec<Place>> {
        let user = require(self.users.as_ref(), &user_id)?;
        Ok(self.resolve_places(user.place_ids()))
    }

    /// Reviews written by `user_id`, in creation order.
    pub fn get_reviews_by_user(&self, user_id: UserId) -> DomainResult<Vec<Review>> {
        let user = require(self.users.as_ref(), &user_id)?;
        Ok(self.resolve_reviews(user.review_ids()))
    }

    pub(super) fn resolve_places(&self, ids: &[PlaceId]) -> Vec<Place> {
        ids.iter().filter_map(|id| self.places.get(id)).collect()
    }
}
