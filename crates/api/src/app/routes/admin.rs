//! Admin-only user management.
//!
//! Unlike public sign-up, these endpoints honour `is_admin` and may change
//! another user's email or password.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{post, put},
};

use hbnb_core::UserId;
use hbnb_infra::{UserChanges, UserRegistration};

use crate::app::dto;
use crate::app::errors::ApiResult;
use crate::app::services::{self, AppServices};
use crate::authz::require_admin;
use crate::context::PrincipalContext;

pub fn protected() -> Router {
    Router::new()
        .route("/admin/users/", post(create_user))
        .route("/admin/users/:id", put(update_user))
}

/// POST /admin/users/ - create a user with an explicit admin flag
pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<PrincipalContext>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    require_admin(&caller)?;
    let registration: UserRegistration = dto::decode(&body, dto::USER_PROTECTED)?;

    let user = services::blocking(&services, move |s| s.facade.create_user(registration)).await?;
    Ok((StatusCode::CREATED, Json(dto::user_to_json(&user))))
}

/// PUT /admin/users/:id - edit any user, credentials included
pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    require_admin(&caller)?;
    let user_id: UserId = dto::parse_id(&id, "User")?;
    let changes: UserChanges = dto::decode(&body, dto::USER_PROTECTED)?;
    let principal = *caller.principal();

    let user = services::blocking(&services, move |s| {
        s.facade.update_user(&principal, user_id, changes)
    })
    .await?;
    Ok(Json(dto::user_to_json(&user)))
}
