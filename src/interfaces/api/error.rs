//! JSON error responses for the HTTP API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors returned by handlers. Translation failures stay generic: callers
/// cannot tell a network outage from every provider rejecting the text.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound,
    TranslationFailed,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound => (StatusCode::NOT_FOUND, "Endpoint not found".to_string()),
            Self::TranslationFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Translation failed".to_string(),
            ),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
