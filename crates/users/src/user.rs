//! User entity for identity and ownership.

use chrono::{DateTime, Utc};

use hbnb_core::{
    DomainResult, Entity, Patchable, PlaceId, ReviewId, UniqueKey, UserId, validate,
};

pub const NAME_MAX_LEN: usize = 50;

/// Validated input for [`User::new`].
///
/// The password arrives already hashed; plaintext never reaches the entity.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

/// Partial update for a [`User`]. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub is_admin: Option<bool>,
}

/// A registered account.
///
/// # Invariants
/// - Names are non-empty and at most [`NAME_MAX_LEN`] characters.
/// - `email` matches `local@domain.tld` and is stored lower-cased.
/// - `password_hash` is opaque and never leaves the service.
/// - `place_ids` / `review_ids` hold back-references maintained by the facade.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    is_admin: bool,
    place_ids: Vec<PlaceId>,
    review_ids: Vec<ReviewId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(input: NewUser) -> DomainResult<Self> {
        Self::with_id(UserId::new(), input, Utc::now())
    }

    pub fn with_id(id: UserId, input: NewUser, now: DateTime<Utc>) -> DomainResult<Self> {
        Ok(Self {
            id,
            first_name: validate::required_text("First name", &input.first_name, NAME_MAX_LEN)?,
            last_name: validate::required_text("Last name", &input.last_name, NAME_MAX_LEN)?,
            email: validate::email(&input.email)?,
            password_hash: validate::non_empty_text("Password hash", &input.password_hash)?,
            is_admin: input.is_admin,
            place_ids: Vec::new(),
            review_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn place_ids(&self) -> &[PlaceId] {
        &self.place_ids
    }

    pub fn review_ids(&self) -> &[ReviewId] {
        &self.review_ids
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_first_name(&mut self, value: &str) -> DomainResult<()> {
        self.first_name = validate::required_text("First name", value, NAME_MAX_LEN)?;
        Ok(())
    }

    pub fn set_last_name(&mut self, value: &str) -> DomainResult<()> {
        self.last_name = validate::required_text("Last name", value, NAME_MAX_LEN)?;
        Ok(())
    }

    pub fn set_email(&mut self, value: &str) -> DomainResult<()> {
        self.email = validate::email(value)?;
        Ok(())
    }

    pub fn set_password_hash(&mut self, value: &str) -> DomainResult<()> {
        self.password_hash = validate::non_empty_text("Password hash", value)?;
        Ok(())
    }

    pub fn set_admin(&mut self, value: bool) {
        self.is_admin = value;
    }

    pub fn attach_place(&mut self, place_id: PlaceId) {
        if !self.place_ids.contains(&place_id) {
            self.place_ids.push(place_id);
        }
    }

    pub fn detach_place(&mut self, place_id: PlaceId) -> bool {
        let before = self.place_ids.len();
        self.place_ids.retain(|id| *id != place_id);
        self.place_ids.len() != before
    }

    pub fn attach_review(&mut self, review_id: ReviewId) {
        if !self.review_ids.contains(&review_id) {
            self.review_ids.push(review_id);
        }
    }

    pub fn detach_review(&mut self, review_id: ReviewId) -> bool {
        let before = self.review_ids.len();
        self.review_ids.retain(|id| *id != review_id);
        self.review_ids.len() != before
    }
}

/// Plaintext password rule, checked before hashing.
pub fn validate_password(plaintext: &str) -> DomainResult<()> {
    validate::non_empty_text("Password", plaintext).map(|_| ())
}

impl Entity for User {
    type Id = UserId;

    const KIND: &'static str = "User";

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new("email", self.email.clone())]
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl Patchable for User {
    type Patch = UserPatch;

    fn apply_patch(&mut self, patch: UserPatch) -> DomainResult<()> {
        let mut next = self.clone();
        if let Some(v) = &patch.first_name {
            next.set_first_name(v)?;
        }
        if let Some(v) = &patch.last_name {
            next.set_last_name(v)?;
        }
        if let Some(v) = &patch.email {
            next.set_email(v)?;
        }
        if let Some(v) = &patch.password_hash {
            next.set_password_hash(v)?;
        }
        if let Some(v) = patch.is_admin {
            next.set_admin(v);
        }
        *self = next;
        Ok(())
    }
}
