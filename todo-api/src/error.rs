//! Error handling for the HTTP layer
//!
//! Maps domain errors to HTTP status codes and the JSON error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use todo_core::TodoError;

use crate::serialization::ErrorResponse;

/// Message returned for every 500, whatever the cause
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Message returned when the JSON body cannot be parsed
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// HTTP-facing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Full detail is logged, never sent to the client
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_body() -> Self {
        ApiError::BadRequest(INVALID_BODY_MESSAGE.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the response body
    pub fn public_message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => msg,
            ApiError::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::Validation(_) => ApiError::BadRequest(err.to_string()),
            TodoError::NotFound(_) => ApiError::NotFound(err.to_string()),
            TodoError::Persistence(_) | TodoError::Configuration(_) | TodoError::Internal(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(error = %detail, "Request failed with internal error");
        }

        let body = ErrorResponse::new(self.public_message());
        (self.status_code(), Json(body)).into_response()
    }
}
