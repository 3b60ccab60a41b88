//! HTTP error mapping for the CRUD surface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use depot_core::DepotError;
use serde_json::json;

/// A domain error surfaced over HTTP.
///
/// Not-found maps to 404; duplicate-id and validation failures map to 400.
/// The body shape `{"detail": ...}` matches what existing clients parse.
#[derive(Debug)]
pub struct ApiError(pub DepotError);

impl From<DepotError> for ApiError {
    fn from(err: DepotError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            DepotError::NotFound { .. } => StatusCode::NOT_FOUND,
            DepotError::Duplicate { .. } | DepotError::Validation { .. } => {
                StatusCode::BAD_REQUEST
            }
        };
        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}
