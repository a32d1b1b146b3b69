use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};

use hbnb_core::PlaceId;
use hbnb_infra::{PlaceChanges, PlaceDraft};

use crate::app::dto::{self, AmenityIdsRequest};
use crate::app::errors::ApiResult;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn public() -> Router {
    Router::new()
        .route("/places/", get(list_places))
        .route("/places/:id", get(get_place))
        .route("/places/:id/reviews", get(list_place_reviews))
}

pub fn protected() -> Router {
    Router::new()
        .route("/places/", post(create_place))
        .route("/places/:id", put(update_place).delete(delete_place))
        .route("/places/:id/amenities", post(add_amenities))
}

/// POST /places/ - list a new place owned by the caller
pub async fn create_place(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<PrincipalContext>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let draft: PlaceDraft = dto::decode(&body, dto::PLACE_PROTECTED)?;
    let place = services.facade.create_place(caller.principal(), draft)?;
    Ok((StatusCode::CREATED, Json(dto::place_to_json(&place))))
}

pub async fn list_places(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let places: Vec<_> = services.facade.get_places().iter().map(dto::place_to_json).collect();
    Json(places)
}

/// GET /places/:id - place with owner, amenities and reviews
pub async fn get_place(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let place_id: PlaceId = dto::parse_id(&id, "Place")?;
    let facade = &services.facade;

    let place = facade.get_place(place_id)?;
    let owner = facade.get_user(place.owner_id()).ok();
    let amenities = facade.get_place_amenities(place_id)?;
    let reviews = facade.get_reviews_by_place(place_id)?;

    Ok(Json(dto::place_detail_to_json(
        &place,
        owner.as_ref(),
        &amenities,
        &reviews,
    )))
}

pub async fn update_place(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let place_id: PlaceId = dto::parse_id(&id, "Place")?;
    let changes: PlaceChanges = dto::decode(&body, dto::PLACE_PROTECTED)?;
    let place = services
        .facade
        .update_place(caller.principal(), place_id, changes)?;
    Ok(Json(dto::place_to_json(&place)))
}

pub async fn delete_place(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let place_id: PlaceId = dto::parse_id(&id, "Place")?;
    services.facade.delete_place(caller.principal(), place_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /places/:id/amenities - link existing amenities to a place
pub async fn add_amenities(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let place_id: PlaceId = dto::parse_id(&id, "Place")?;
    let req: AmenityIdsRequest = dto::decode(&body, dto::NONE_PROTECTED)?;
    let place = services
        .facade
        .add_place_amenities(caller.principal(), place_id, req.amenities)?;
    Ok(Json(dto::place_to_json(&place)))
}

pub async fn list_place_reviews(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let place_id: PlaceId = dto::parse_id(&id, "Place")?;
    let reviews: Vec<_> = services
        .facade
        .get_reviews_by_place(place_id)?
        .iter()
        .map(dto::review_to_json)
        .collect();
    Ok(Json(reviews))
}
