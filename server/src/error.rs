//! HTTP-facing error type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Outcome of a failed request.
///
/// Responses carry only the status code. Details belong in the log.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed identifier or body. The backend was not consulted.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Nothing stored under the identifier.
    #[error("not found")]
    NotFound,

    /// Backend failure or an unencodable response.
    #[error("service unavailable")]
    Unavailable,
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.status().into_response()
    }
}
