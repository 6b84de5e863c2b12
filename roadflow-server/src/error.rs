//! Maps engine errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roadflow_core::Error;
use serde_json::json;

pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::UnknownNode(_) | Error::UnknownEdge(_) => StatusCode::NOT_FOUND,
            Error::DuplicateId(_) | Error::InvalidData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::NegativeCycle | Error::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
