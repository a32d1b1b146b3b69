use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{debug, error, warn};

use hbnb_core::{DomainError, ErrorKind};

/// Handler error: a domain failure rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        domain_error_to_response(self.0)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::InvalidInput | ErrorKind::Malformed => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    let kind = err.kind();
    let status = status_for(kind);
    match kind {
        ErrorKind::Internal => error!(error = %err, "request failed"),
        ErrorKind::Forbidden | ErrorKind::Unauthenticated | ErrorKind::Conflict => {
            warn!(status = status.as_u16(), error = %err, "request rejected")
        }
        _ => debug!(status = status.as_u16(), error = %err, "request rejected"),
    }
    json_error(status, err.to_string())
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, axum::Json(json!({ "error": message.into() }))).into_response()
}
