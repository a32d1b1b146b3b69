use std::str::FromStr;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use hbnb_amenities::Amenity;
use hbnb_core::{AmenityId, DomainError, DomainResult, Entity};
use hbnb_places::Place;
use hbnb_reviews::Review;
use hbnb_users::User;

// -------------------------
// Request decoding
// -------------------------

pub const ID_PROTECTED: &[&str] = &["id"];
pub const USER_PROTECTED: &[&str] = ID_PROTECTED;
pub const PLACE_PROTECTED: &[&str] = &["id", "owner_id", "owner"];
pub const REVIEW_CREATE_PROTECTED: &[&str] = &["id", "user_id"];
pub const REVIEW_PROTECTED: &[&str] = &["id", "user_id", "place_id"];
pub const NONE_PROTECTED: &[&str] = &[];

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AmenityIdsRequest {
    pub amenities: Vec<AmenityId>,
}

/// Decode a JSON object body into `T`.
///
/// Keys in `protected` are refused before decoding. Syntax errors and type
/// mismatches are `InvalidType`.
pub fn decode<T: DeserializeOwned>(body: &[u8], protected: &[&str]) -> DomainResult<T> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| DomainError::invalid_type(format!("malformed JSON body: {e}")))?;
    let Value::Object(map) = &value else {
        return Err(DomainError::invalid_type("request body must be a JSON object"));
    };
    if let Some(key) = protected.iter().find(|key| map.contains_key(**key)) {
        return Err(DomainError::validation(format!("Field '{key}' cannot be set")));
    }
    serde_json::from_value(value).map_err(|e| DomainError::invalid_type(e.to_string()))
}

/// Path ids that do not parse cannot name a stored record.
pub fn parse_id<T: FromStr>(raw: &str, kind: &str) -> DomainResult<T> {
    raw.parse()
        .map_err(|_| DomainError::not_found(format!("{kind} not found")))
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn user_to_json(user: &User) -> Value {
    json!({
        "id": user.id().to_string(),
        "first_name": user.first_name(),
        "last_name": user.last_name(),
        "email": user.email(),
        "is_admin": user.is_admin(),
        "created_at": user.created_at().to_rfc3339(),
        "updated_at": user.updated_at().to_rfc3339(),
    })
}

pub fn amenity_to_json(amenity: &Amenity) -> Value {
    json!({
        "id": amenity.id().to_string(),
        "name": amenity.name(),
    })
}

pub fn review_to_json(review: &Review) -> Value {
    json!({
        "id": review.id().to_string(),
        "text": review.text(),
        "rating": review.rating(),
        "place_id": review.place_id().to_string(),
        "user_id": review.user_id().to_string(),
        "created_at": review.created_at().to_rfc3339(),
        "updated_at": review.updated_at().to_rfc3339(),
    })
}

pub fn place_to_json(place: &Place) -> Value {
    json!({
        "id": place.id().to_string(),
        "title": place.title(),
        "description": place.description(),
        "price": place.price(),
        "latitude": place.latitude(),
        "longitude": place.longitude(),
        "owner_id": place.owner_id().to_string(),
        "amenities": place.amenity_ids().iter().map(|id| id.to_string()).collect::<Vec<_>>(),
        "created_at": place.created_at().to_rfc3339(),
        "updated_at": place.updated_at().to_rfc3339(),
    })
}

/// Place with its owner, amenities and reviews resolved.
pub fn place_detail_to_json(
    place: &Place,
    owner: Option<&User>,
    amenities: &[Amenity],
    reviews: &[Review],
) -> Value {
    let mut body = place_to_json(place);
    body["owner"] = owner.map_or(Value::Null, |u| {
        json!({
            "id": u.id().to_string(),
            "first_name": u.first_name(),
            "last_name": u.last_name(),
            "email": u.email(),
        })
    });
    body["amenities"] = Value::Array(amenities.iter().map(amenity_to_json).collect());
    body["reviews"] = Value::Array(
        reviews
            .iter()
            .map(|r| {
                json!({
                    "id": r.id().to_string(),
                    "text": r.text(),
                    "rating": r.rating(),
                    "user_id": r.user_id().to_string(),
                })
            })
            .collect(),
    );
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_core::{ErrorKind, PlaceId};
    use hbnb_infra::{PlaceChanges, ReviewDraft};
    use hbnb_users::NewUser;

    #[test]
    fn protected_key_is_rejected_before_decoding() {
        let err = decode::<PlaceChanges>(br#"{"owner_id": "x", "title": "T"}"#, PLACE_PROTECTED)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn wrong_type_is_malformed() {
        let err = decode::<PlaceChanges>(br#"{"price": "cheap"}"#, PLACE_PROTECTED).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);

        let err = decode::<PlaceChanges>(b"[1, 2]", PLACE_PROTECTED).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);

        let err = decode::<PlaceChanges>(b"{not json", PLACE_PROTECTED).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn review_draft_decodes_place_id() {
        let place_id = PlaceId::new();
        let body = json!({ "place_id": place_id, "text": "Nice", "rating": 4 }).to_string();
        let draft: ReviewDraft = decode(body.as_bytes(), NONE_PROTECTED).unwrap();
        assert_eq!(draft.place_id, place_id);
        assert_eq!(draft.rating, 4);
    }

    #[test]
    fn unparsable_path_id_is_not_found() {
        let err = parse_id::<PlaceId>("not-a-uuid", "Place").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Place not found");
    }

    #[test]
    fn user_json_never_contains_password() {
        let user = User::new(NewUser {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            is_admin: false,
        })
        .unwrap();
        let body = user_to_json(&user);
        assert!(body.get("password").is_none());
        assert!(!body.to_string().contains("argon2id"));
    }
}
