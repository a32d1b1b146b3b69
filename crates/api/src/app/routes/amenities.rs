use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use hbnb_core::AmenityId;
use hbnb_infra::{AmenityChanges, AmenityDraft};

use crate::app::dto;
use crate::app::errors::ApiResult;
use crate::app::services::AppServices;
use crate::authz::require_admin;
use crate::context::PrincipalContext;

pub fn public() -> Router {
    Router::new()
        .route("/amenities/", get(list_amenities))
        .route("/amenities/:id", get(get_amenity))
}

pub fn protected() -> Router {
    Router::new()
        .route("/amenities/", post(create_amenity))
        .route(
            "/amenities/:id",
            axum::routing::put(update_amenity).delete(delete_amenity),
        )
}

pub async fn create_amenity(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<PrincipalContext>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    require_admin(&caller)?;
    let draft: AmenityDraft = dto::decode(&body, dto::ID_PROTECTED)?;
    let amenity = services.facade.create_amenity(caller.principal(), draft)?;
    Ok((StatusCode::CREATED, Json(dto::amenity_to_json(&amenity))))
}

pub async fn list_amenities(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let amenities: Vec<_> = services
        .facade
        .get_amenities()
        .iter()
        .map(dto::amenity_to_json)
        .collect();
    Json(amenities)
}

pub async fn get_amenity(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let amenity_id: AmenityId = dto::parse_id(&id, "Amenity")?;
    let amenity = services.facade.get_amenity(amenity_id)?;
    Ok(Json(dto::amenity_to_json(&amenity)))
}

pub async fn update_amenity(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    require_admin(&caller)?;
    let amenity_id: AmenityId = dto::parse_id(&id, "Amenity")?;
    let changes: AmenityChanges = dto::decode(&body, dto::ID_PROTECTED)?;
    let amenity = services
        .facade
        .update_amenity(caller.principal(), amenity_id, changes)?;
    Ok(Json(dto::amenity_to_json(&amenity)))
}

pub async fn delete_amenity(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    require_admin(&caller)?;
    let amenity_id: AmenityId = dto::parse_id(&id, "Amenity")?;
    services.facade.delete_amenity(caller.principal(), amenity_id)?;
    Ok(StatusCode::NO_CONTENT)
}
