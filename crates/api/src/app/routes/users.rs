use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;

use hbnb_core::{Entity, UserId};
use hbnb_infra::{UserChanges, UserRegistration};

use crate::app::dto;
use crate::app::errors::ApiResult;
use crate::app::services::{self, AppServices};
use crate::context::PrincipalContext;

pub fn public() -> Router {
    Router::new()
        .route("/users/", post(register).get(list_users))
        .route("/users/:id", get(get_user))
}

pub fn protected() -> Router {
    Router::new().route("/users/:id", put(update_user))
}

/// POST /users/ - self sign-up; `is_admin` in the payload is ignored.
/// Admin accounts are created through `POST /admin/users/`.
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let mut registration: UserRegistration = dto::decode(&body, dto::USER_PROTECTED)?;
    registration.is_admin = false;

    let user = services::blocking(&services, move |s| s.facade.create_user(registration)).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": user.id().to_string(),
            "message": "User created",
        })),
    ))
}

pub async fn list_users(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let users: Vec<_> = services.facade.get_users().iter().map(dto::user_to_json).collect();
    Json(users)
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let user_id: UserId = dto::parse_id(&id, "User")?;
    let user = services.facade.get_user(user_id)?;
    Ok(Json(dto::user_to_json(&user)))
}

/// PUT /users/:id - self-service profile edit (admins may edit anyone)
pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let user_id: UserId = dto::parse_id(&id, "User")?;
    let changes: UserChanges = dto::decode(&body, dto::USER_PROTECTED)?;
    let principal = *caller.principal();

    let user = services::blocking(&services, move |s| {
        s.facade.update_user(&principal, user_id, changes)
    })
    .await?;
    Ok(Json(dto::user_to_json(&user)))
}
