use serde::Deserialize;
use tracing::info;

use hbnb_amenities::{Amenity, AmenityPatch};
use hbnb_auth::{Principal, ensure_admin};
use hbnb_core::{AmenityId, DomainResult, Entity, PlaceId};
use hbnb_places::Place;

use super::{HbnbFacade, ignore_missing, require};
use crate::repository::RepositoryExt;

#[derive(Debug, Clone, Deserialize)]
pub struct AmenityDraft {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmenityChanges {
    pub name: Option<String>,
}

impl HbnbFacade {
    pub fn create_amenity(&self, caller: &Principal, draft: AmenityDraft) -> DomainResult<Amenity> {
        ensure_admin(caller)?;
        let amenity = self.amenities.add(Amenity::new(&draft.name)?)?;
        info!(amenity_id = %amenity.id(), name = amenity.name(), "amenity created");
        Ok(amenity)
    }

    pub fn get_amenity(&self, amenity_id: AmenityId) -> DomainResult<Amenity> {
        require(self.amenities.as_ref(), &amenity_id)
    }

    pub fn get_amenities(&self) -> Vec<Amenity> {
        self.amenities.get_all()
    }

    pub fn update_amenity(
        &self,
        caller: &Principal,
        amenity_id: AmenityId,
        changes: AmenityChanges,
    ) -> DomainResult<Amenity> {
        ensure_admin(caller)?;
        let amenity = self
            .amenities
            .update(&amenity_id, AmenityPatch { name: changes.name })?;
        info!(amenity_id = %amenity_id, "amenity updated");
        Ok(amenity)
    }

    /// Remove an amenity and unlink it from every place offering it.
    pub fn delete_amenity(&self, caller: &Principal, amenity_id: AmenityId) -> DomainResult<()> {
        ensure_admin(caller)?;
        let _guard = self.exclusive()?;
        require(self.amenities.as_ref(), &amenity_id)?;

        let linked: Vec<PlaceId> = self
            .places
            .get_all()
            .into_iter()
            .filter(|p| p.amenity_ids().contains(&amenity_id))
            .map(|p| *p.id())
            .collect();
        for place_id in &linked {
            ignore_missing(self.places.modify(place_id, &mut |place: &mut Place| {
                place.detach_amenity(amenity_id);
                Ok(())
            }))?;
        }
        self.amenities.delete(&amenity_id);

        info!(amenity_id = %amenity_id, unlinked_places = linked.len(), "amenity deleted");
        Ok(())
    }

    pub(super) fn resolve_amenities(&self, ids: &[AmenityId]) -> Vec<Amenity> {
        ids.iter().filter_map(|id| self.amenities.get(id)).collect()
    }
}
