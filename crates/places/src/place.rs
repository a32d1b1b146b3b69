use chrono::{DateTime, Utc};

use hbnb_core::{
    AmenityId, DomainResult, Entity, Patchable, PlaceId, ReviewId, UserId, validate,
};

pub const TITLE_MAX_LEN: usize = 100;

/// Input for [`Place::new`].
///
/// `owner_id` and `amenity_ids` are assumed to reference existing records;
/// resolving them is the caller's job.
#[derive(Debug, Clone)]
pub struct NewPlace {
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: UserId,
    pub amenity_ids: Vec<AmenityId>,
}

/// Partial update for a [`Place`]. The owner is not patchable.
#[derive(Debug, Clone, Default)]
pub struct PlacePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Replaces the amenity set when present.
    pub amenity_ids: Option<Vec<AmenityId>>,
}

/// A listed rental.
///
/// # Invariants
/// - `title` is non-empty and at most [`TITLE_MAX_LEN`] characters.
/// - `price` is finite and non-negative.
/// - `latitude` ∈ [-90, 90], `longitude` ∈ [-180, 180].
/// - `owner_id` never changes after creation.
/// - `amenity_ids` has no duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    id: PlaceId,
    title: String,
    description: String,
    price: f64,
    latitude: f64,
    longitude: f64,
    owner_id: UserId,
    amenity_ids: Vec<AmenityId>,
    review_ids: Vec<ReviewId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Place {
    pub fn new(input: NewPlace) -> DomainResult<Self> {
        Self::with_id(PlaceId::new(), input, Utc::now())
    }

    pub fn with_id(id: PlaceId, input: NewPlace, now: DateTime<Utc>) -> DomainResult<Self> {
        let mut place = Self {
            id,
            title: validate::required_text("Title", &input.title, TITLE_MAX_LEN)?,
            description: input.description.unwrap_or_default(),
            price: validate::non_negative("Price", input.price)?,
            latitude: validate_latitude(input.latitude)?,
            longitude: validate_longitude(input.longitude)?,
            owner_id: input.owner_id,
            amenity_ids: Vec::new(),
            review_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        for amenity_id in input.amenity_ids {
            place.attach_amenity(amenity_id);
        }
        Ok(place)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    pub fn amenity_ids(&self) -> &[AmenityId] {
        &self.amenity_ids
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

    pub fn set_title(&mut self, value: &str) -> DomainResult<()> {
        self.title = validate::required_text("Title", value, TITLE_MAX_LEN)?;
        Ok(())
    }

    pub fn set_description(&mut self, value: &str) {
        self.description = value.to_string();
    }

    pub fn set_price(&mut self, value: f64) -> DomainResult<()> {
        self.price = validate::non_negative("Price", value)?;
        Ok(())
    }

    pub fn set_latitude(&mut self, value: f64) -> DomainResult<()> {
        self.latitude = validate_latitude(value)?;
        Ok(())
    }

    pub fn set_longitude(&mut self, value: f64) -> DomainResult<()> {
        self.longitude = validate_longitude(value)?;
        Ok(())
    }

    /// Returns `false` when the amenity was already linked.
    pub fn attach_amenity(&mut self, amenity_id: AmenityId) -> bool {
        if self.amenity_ids.contains(&amenity_id) {
            return false;
        }
        self.amenity_ids.push(amenity_id);
        true
    }

    pub fn detach_amenity(&mut self, amenity_id: AmenityId) -> bool {
        let before = self.amenity_ids.len();
        self.amenity_ids.retain(|id| *id != amenity_id);
        self.amenity_ids.len() != before
    }

    pub fn replace_amenities(&mut self, amenity_ids: Vec<AmenityId>) {
        self.amenity_ids.clear();
        for amenity_id in amenity_ids {
            self.attach_amenity(amenity_id);
        }
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

pub fn validate_latitude(value: f64) -> DomainResult<f64> {
    validate::float_between("Latitude", value, -90.0, 90.0)
}

pub fn validate_longitude(value: f64) -> DomainResult<f64> {
    validate::float_between("Longitude", value, -180.0, 180.0)
}

impl Entity for Place {
    type Id = PlaceId;

    const KIND: &'static str = "Place";

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl Patchable for Place {
    type Patch = PlacePatch;

    fn apply_patch(&mut self, patch: PlacePatch) -> DomainResult<()> {
        let mut next = self.clone();
        if let Some(v) = &patch.title {
            next.set_title(v)?;
        }
        if let Some(v) = &patch.description {
            next.set_description(v);
        }
        if let Some(v) = patch.price {
            next.set_price(v)?;
        }
        if let Some(v) = patch.latitude {
            next.set_latitude(v)?;
        }
        if let Some(v) = patch.longitude {
            next.set_longitude(v)?;
        }
        if let Some(ids) = patch.amenity_ids {
            next.replace_amenities(ids);
        }
        *self = next;
        Ok(())
    }
}
