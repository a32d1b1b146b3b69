use chrono::{DateTime, Utc};

use hbnb_core::{AmenityId, DomainResult, Entity, Patchable, UniqueKey, validate};

pub const NAME_MAX_LEN: usize = 50;

#[derive(Debug, Clone, Default)]
pub struct AmenityPatch {
    pub name: Option<String>,
}

/// A feature a place can offer ("Wifi", "Pool").
///
/// Names are unique across the system (compared case-insensitively).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amenity {
    id: AmenityId,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Amenity {
    pub fn new(name: &str) -> DomainResult<Self> {
        Self::with_id(AmenityId::new(), name, Utc::now())
    }

    pub fn with_id(id: AmenityId, name: &str, now: DateTime<Utc>) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: validate::required_text("Name", name, NAME_MAX_LEN)?,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_name(&mut self, value: &str) -> DomainResult<()> {
        self.name = validate::required_text("Name", value, NAME_MAX_LEN)?;
        Ok(())
    }
}

impl Entity for Amenity {
    type Id = AmenityId;

    const KIND: &'static str = "Amenity";

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new("name", self.name.to_lowercase())]
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

impl Patchable for Amenity {
    type Patch = AmenityPatch;

    fn apply_patch(&mut self, patch: AmenityPatch) -> DomainResult<()> {
        if let Some(name) = &patch.name {
            self.set_name(name)?;
        }
        Ok(())
    }
}
