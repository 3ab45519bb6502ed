//! HTTP error mapping for the Messages API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use msgbridge_core::GenerateError;
use thiserror::Error;

use crate::models::{ErrorDetail, ErrorKind, ErrorResponse};

/// Errors surfaced to front-protocol clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be parsed. No backend call was made.
    #[error("{0}")]
    InvalidRequest(String),

    /// The backend call failed; its message is passed through unchanged.
    #[error(transparent)]
    Backend(#[from] GenerateError),
}

impl ApiError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest(_) => ErrorKind::InvalidRequestError,
            Self::Backend(_) => ErrorKind::ApiError,
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Inner `{type, message}` object.
    #[must_use]
    pub fn detail(&self) -> ErrorDetail {
        ErrorDetail {
            r#type: self.kind(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::from(self.detail());
        (self.status(), Json(body)).into_response()
    }
}
