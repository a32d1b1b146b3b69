use axum::Router;

pub mod admin;
pub mod amenities;
pub mod auth;
pub mod places;
pub mod reviews;
pub mod system;
pub mod users;

/// Endpoints reachable without a token.
pub fn public() -> Router {
    Router::new()
        .merge(auth::public())
        .merge(users::public())
        .merge(amenities::public())
        .merge(places::public())
        .merge(reviews::public())
}

/// Endpoints that require a bearer token.
pub fn protected() -> Router {
    Router::new()
        .merge(auth::protected())
        .merge(users::protected())
        .merge(admin::protected())
        .merge(amenities::protected())
        .merge(places::protected())
        .merge(reviews::protected())
}
