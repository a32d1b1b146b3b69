use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::Extension,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tracing::info;

use hbnb_core::Entity;

use crate::app::dto::{self, LoginRequest};
use crate::app::errors::ApiResult;
use crate::app::services::{self, AppServices};
use crate::context::PrincipalContext;

pub fn public() -> Router {
    Router::new().route("/auth/login", post(login))
}

pub fn protected() -> Router {
    Router::new().route("/auth/me", get(me))
}

/// POST /auth/login - exchange credentials for an access token
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let req: LoginRequest = dto::decode(&body, dto::NONE_PROTECTED)?;
    let user = services::blocking(&services, move |s| {
        s.facade.authenticate(&req.email, &req.password)
    })
    .await?;
    let token = services.issue_token(&user)?;

    info!(user_id = %user.id(), "login succeeded");
    Ok(Json(json!({ "access_token": token })))
}

/// GET /auth/me - the caller as seen by the token
pub async fn me(Extension(caller): Extension<PrincipalContext>) -> impl IntoResponse {
    Json(json!({
        "id": caller.principal().user_id.to_string(),
        "is_admin": caller.is_admin(),
        "expires_at": caller.expires_at().map(|t| t.to_rfc3339()),
    }))
}
