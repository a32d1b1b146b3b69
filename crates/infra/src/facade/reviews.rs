use serde::Deserialize;
use tracing::{info, warn};

use hbnb_auth::{Principal, ensure_owner_or_admin};
use hbnb_core::{DomainError, DomainResult, Entity, PlaceId, ReviewId, UserId};
use hbnb_places::Place;
use hbnb_reviews::{NewReview, Review, ReviewPatch};
use hbnb_users::User;

use super::{HbnbFacade, ignore_missing, require};
use crate::repository::RepositoryExt;

const OWN_PLACE: &str = "You cannot review your own place";
const ALREADY_REVIEWED: &str = "You have already reviewed this place";

/// Review payload. The author is always the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewDraft {
    pub place_id: PlaceId,
    pub text: String,
    pub rating: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewChanges {
    pub text: Option<String>,
    pub rating: Option<i64>,
}

impl HbnbFacade {
    /// Review a place as `caller`.
    ///
    /// Owners cannot review their own place and nobody reviews a place twice;
    /// both are business-rule failures.
    pub fn create_review(&self, caller: &Principal, draft: ReviewDraft) -> DomainResult<Review> {
        let _guard = self.exclusive()?;
        let author = self
            .users
            .get(&caller.user_id)
            .ok_or_else(|| DomainError::not_found("User not found"))?;
        let place = self
            .places
            .get(&draft.place_id)
            .ok_or_else(|| DomainError::not_found("Place not found"))?;

        if place.is_owned_by(*author.id()) {
            warn!(user_id = %author.id(), place_id = %place.id(), "self-review rejected");
            return Err(DomainError::business_rule(OWN_PLACE));
        }
        if self.user_already_reviewed(*author.id(), *place.id()) {
            warn!(user_id = %author.id(), place_id = %place.id(), "duplicate review rejected");
            return Err(DomainError::business_rule(ALREADY_REVIEWED));
        }

        let review = Review::new(NewReview {
            text: draft.text,
            rating: draft.rating,
            place_id: *place.id(),
            user_id: *author.id(),
        })?;
        let review = match self.reviews.add(review) {
            Ok(review) => review,
            Err(DomainError::Conflict(_)) => return Err(DomainError::business_rule(ALREADY_REVIEWED)),
            Err(e) => return Err(e),
        };

        let review_id = *review.id();
        self.users.modify(author.id(), &mut |user: &mut User| {
            user.attach_review(review_id);
            Ok(())
        })?;
        self.places.modify(place.id(), &mut |listing: &mut Place| {
            listing.attach_review(review_id);
            Ok(())
        })?;

        info!(
            review_id = %review_id,
            place_id = %place.id(),
            user_id = %author.id(),
            rating = review.rating(),
            "review created"
        );
        Ok(review)
    }

    pub fn get_review(&self, review_id: ReviewId) -> DomainResult<Review> {
        require(self.reviews.as_ref(), &review_id)
    }

    pub fn get_reviews(&self) -> Vec<Review> {
        self.reviews.get_all()
    }

    pub fn user_already_reviewed(&self, user_id: UserId, place_id: PlaceId) -> bool {
        self.reviews
            .find_first(&|r: &Review| r.user_id() == user_id && r.place_id() == place_id)
            .is_some()
    }

    pub fn update_review(
        &self,
        caller: &Principal,
        review_id: ReviewId,
        changes: ReviewChanges,
    ) -> DomainResult<Review> {
        let review = require(self.reviews.as_ref(), &review_id)?;
        ensure_owner_or_admin(caller, review.user_id())?;

        let review = self.reviews.update(
            &review_id,
            ReviewPatch {
                text: changes.text,
                rating: changes.rating,
            },
        )?;
        info!(review_id = %review_id, by = %caller.user_id, "review updated");
        Ok(review)
    }

    /// Delete a review and detach it from its author and place.
    pub fn delete_review(&self, caller: &Principal, review_id: ReviewId) -> DomainResult<()> {
        let _guard = self.exclusive()?;
        let review = require(self.reviews.as_ref(), &review_id)?;
        ensure_owner_or_admin(caller, review.user_id())?;

        self.reviews.delete(&review_id);
        ignore_missing(self.users.modify(&review.user_id(), &mut |user: &mut User| {
            user.detach_review(review_id);
            Ok(())
        }))?;
        ignore_missing(self.places.modify(&review.place_id(), &mut |place: &mut Place| {
            place.detach_review(review_id);
            Ok(())
        }))?;

        info!(review_id = %review_id, by = %caller.user_id, "review deleted");
        Ok(())
    }

    pub(super) fn resolve_reviews(&self, ids: &[ReviewId]) -> Vec<Review> {
        ids.iter().filter_map(|id| self.reviews.get(id)).collect()
    }
}
