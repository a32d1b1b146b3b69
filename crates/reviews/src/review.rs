use chrono::{DateTime, Utc};

use hbnb_core::{
    DomainResult, Entity, Patchable, PlaceId, ReviewId, UniqueKey, UserId, validate,
};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

#[derive(Debug, Clone)]
pub struct NewReview {
    pub text: String,
    pub rating: i64,
    pub place_id: PlaceId,
    pub user_id: UserId,
}

/// Partial update for a [`Review`]. Author and place are fixed.
#[derive(Debug, Clone, Default)]
pub struct ReviewPatch {
    pub text: Option<String>,
    pub rating: Option<i64>,
}

/// A user's rating of a place.
///
/// # Invariants
/// - `text` is non-empty.
/// - `rating` ∈ [`MIN_RATING`, `MAX_RATING`].
/// - At most one review per `(user_id, place_id)`; exposed as the
///   `user_place` unique key so storage can enforce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    id: ReviewId,
    text: String,
    rating: u8,
    place_id: PlaceId,
    user_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(input: NewReview) -> DomainResult<Self> {
        Self::with_id(ReviewId::new(), input, Utc::now())
    }

    pub fn with_id(id: ReviewId, input: NewReview, now: DateTime<Utc>) -> DomainResult<Self> {
        Ok(Self {
            id,
            text: validate::non_empty_text("Text", &input.text)?,
            rating: validate_rating(input.rating)?,
            place_id: input.place_id,
            user_id: input.user_id,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn place_id(&self) -> PlaceId {
        self.place_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_text(&mut self, value: &str) -> DomainResult<()> {
        self.text = validate::non_empty_text("Text", value)?;
        Ok(())
    }

    pub fn set_rating(&mut self, value: i64) -> DomainResult<()> {
        self.rating = validate_rating(value)?;
        Ok(())
    }
}

/// Rating rule: an integer from 1 to 5 inclusive.
pub fn validate_rating(value: i64) -> DomainResult<u8> {
    let value = validate::int_between("Rating", value, MIN_RATING, MAX_RATING)?;
    // In range, so the narrowing cannot fail.
    Ok(value as u8)
}

/// Compound key shared by every review a user writes for one place.
pub fn user_place_key(user_id: UserId, place_id: PlaceId) -> UniqueKey {
    UniqueKey::new("user_place", format!("{user_id}:{place_id}"))
}

impl Entity for Review {
    type Id = ReviewId;

    const KIND: &'static str = "Review";

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![user_place_key(self.user_id, self.place_id)]
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl Patchable for Review {
    type Patch = ReviewPatch;

    fn apply_patch(&mut self, patch: ReviewPatch) -> DomainResult<()> {
        let mut next = self.clone();
        if let Some(v) = &patch.text {
            next.set_text(v)?;
        }
        if let Some(v) = patch.rating {
            next.set_rating(v)?;
        }
        *self = next;
        Ok(())
    }
}
