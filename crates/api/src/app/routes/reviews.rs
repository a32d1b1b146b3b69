use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};

use hbnb_core::ReviewId;
use hbnb_infra::{ReviewChanges, ReviewDraft};

use crate::app::dto;
use crate::app::errors::ApiResult;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn public() -> Router {
    Router::new()
        .route("/reviews/", get(list_reviews))
        .route("/reviews/:id", get(get_review))
}

pub fn protected() -> Router {
    Router::new()
        .route("/reviews/", post(create_review))
        .route("/reviews/:id", put(update_review).delete(delete_review))
}

/// POST /reviews/ - the caller reviews a place
pub async fn create_review(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<PrincipalContext>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let draft: ReviewDraft = dto::decode(&body, dto::REVIEW_CREATE_PROTECTED)?;
    let review = services.facade.create_review(caller.principal(), draft)?;
    Ok((StatusCode::CREATED, Json(dto::review_to_json(&review))))
}

pub async fn list_reviews(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let reviews: Vec<_> = services.facade.get_reviews().iter().map(dto::review_to_json).collect();
    Json(reviews)
}

pub async fn get_review(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let review_id: ReviewId = dto::parse_id(&id, "Review")?;
    let review = services.facade.get_review(review_id)?;
    Ok(Json(dto::review_to_json(&review)))
}

pub async fn update_review(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let review_id: ReviewId = dto::parse_id(&id, "Review")?;
    let changes: ReviewChanges = dto::decode(&body, dto::REVIEW_PROTECTED)?;
    let review = services
        .facade
        .update_review(caller.principal(), review_id, changes)?;
    Ok(Json(dto::review_to_json(&review)))
}

pub async fn delete_review(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let review_id: ReviewId = dto::parse_id(&id, "Review")?;
    services.facade.delete_review(caller.principal(), review_id)?;
    Ok(StatusCode::NO_CONTENT)
}
