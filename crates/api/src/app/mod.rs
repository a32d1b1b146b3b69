//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: facade, hasher and token issuer wiring
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request decoding and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub const API_PREFIX: &str = "/api/v1";

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> anyhow::Result<Router> {
    let jwt = Arc::new(hbnb_auth::Hs256JwtValidator::new(
        config.jwt_secret.clone().into_bytes(),
    ));
    let auth_state = middleware::AuthState { jwt };

    let services = Arc::new(services::build_services(config)?);

    // Protected routes: require a valid bearer token.
    let protected = routes::protected().route_layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .nest(API_PREFIX, routes::public().merge(protected))
        .layer(ServiceBuilder::new().layer(Extension(services))))
}
