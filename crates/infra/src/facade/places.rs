use serde::Deserialize;
use tracing::{debug, info};

use hbnb_amenities::Amenity;
use hbnb_auth::{Principal, ensure_owner_or_admin};
use hbnb_core::{AmenityId, DomainError, DomainResult, Entity, PlaceId};
use hbnb_places::{NewPlace, Place, PlacePatch};
use hbnb_reviews::Review;
use hbnb_users::User;

use super::{HbnbFacade, ignore_missing, require};
use crate::repository::RepositoryExt;

/// Listing payload. The owner is always the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub amenities: Vec<AmenityId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Replaces the amenity set when present.
    pub amenities: Option<Vec<AmenityId>>,
}

impl HbnbFacade {
    pub fn create_place(&self, caller: &Principal, draft: PlaceDraft) -> DomainResult<Place> {
        let _guard = self.exclusive()?;
        let owner = self
            .users
            .get(&caller.user_id)
            .ok_or_else(|| DomainError::not_found("User not found"))?;
        self.check_amenities(&draft.amenities)?;

        let place = Place::new(NewPlace {
            title: draft.title,
            description: draft.description,
            price: draft.price,
            latitude: draft.latitude,
            longitude: draft.longitude,
            owner_id: *owner.id(),
            amenity_ids: draft.amenities,
        })?;
        let place = self.places.add(place)?;
        let place_id = *place.id();
        self.users.modify(owner.id(), &mut |user: &mut User| {
            user.attach_place(place_id);
            Ok(())
        })?;

        info!(place_id = %place_id, owner_id = %owner.id(), "place created");
        Ok(place)
    }

    pub fn get_place(&self, place_id: PlaceId) -> DomainResult<Place> {
        require(self.places.as_ref(), &place_id)
    }

    pub fn get_places(&self) -> Vec<Place> {
        self.places.get_all()
    }

    /// Update a listing. Only its owner or an admin may do so.
    pub fn update_place(
        &self,
        caller: &Principal,
        place_id: PlaceId,
        changes: PlaceChanges,
    ) -> DomainResult<Place> {
        let _guard = self.exclusive()?;
        let place = require(self.places.as_ref(), &place_id)?;
        ensure_owner_or_admin(caller, place.owner_id())?;
        if let Some(ids) = &changes.amenities {
            self.check_amenities(ids)?;
        }

        let place = self.places.update(
            &place_id,
            PlacePatch {
                title: changes.title,
                description: changes.description,
                price: changes.price,
                latitude: changes.latitude,
                longitude: changes.longitude,
                amenity_ids: changes.amenities,
            },
        )?;
        info!(place_id = %place_id, by = %caller.user_id, "place updated");
        Ok(place)
    }

    /// Link more amenities to a place. Ids already linked are skipped.
    pub fn add_place_amenities(
        &self,
        caller: &Principal,
        place_id: PlaceId,
        amenity_ids: Vec<AmenityId>,
    ) -> DomainResult<Place> {
        if amenity_ids.is_empty() {
            return Err(DomainError::validation("Amenity list must not be empty"));
        }
        let _guard = self.exclusive()?;
        let place = require(self.places.as_ref(), &place_id)?;
        ensure_owner_or_admin(caller, place.owner_id())?;
        self.check_amenities(&amenity_ids)?;

        let mut added = 0usize;
        let place = self.places.modify(&place_id, &mut |place: &mut Place| {
            added = amenity_ids
                .iter()
                .filter(|id| place.attach_amenity(**id))
                .count();
            Ok(())
        })?;
        info!(place_id = %place_id, added, "amenities linked");
        Ok(place)
    }

    pub fn get_place_amenities(&self, place_id: PlaceId) -> DomainResult<Vec<Amenity>> {
        let place = require(self.places.as_ref(), &place_id)?;
        Ok(self.resolve_amenities(place.amenity_ids()))
    }

    /// Reviews of a place, in creation order.
    pub fn get_reviews_by_place(&self, place_id: PlaceId) -> DomainResult<Vec<Review>> {
        let place = require(self.places.as_ref(), &place_id)?;
        Ok(self.resolve_reviews(place.review_ids()))
    }

    /// Delete a listing together with its reviews.
    pub fn delete_place(&self, caller: &Principal, place_id: PlaceId) -> DomainResult<()> {
        let _guard = self.exclusive()?;
        let place = require(self.places.as_ref(), &place_id)?;
        ensure_owner_or_admin(caller, place.owner_id())?;

        for review_id in place.review_ids() {
            let Some(review) = self.reviews.delete(review_id) else {
                continue;
            };
            ignore_missing(self.users.modify(&review.user_id(), &mut |user: &mut User| {
                user.detach_review(*review_id);
                Ok(())
            }))?;
        }
        ignore_missing(self.users.modify(&place.owner_id(), &mut |user: &mut User| {
            user.detach_place(place_id);
            Ok(())
        }))?;
        self.places.delete(&place_id);

        info!(
            place_id = %place_id,
            removed_reviews = place.review_ids().len(),
            by = %caller.user_id,
            "place deleted"
        );
        Ok(())
    }

    fn check_amenities(&self, ids: &[AmenityId]) -> DomainResult<()> {
        for id in ids {
            if self.amenities.get(id).is_none() {
                debug!(amenity_id = %id, "unknown amenity referenced");
                return Err(DomainError::not_found(format!("Amenity not found: {id}")));
            }
        }
        Ok(())
    }
}
