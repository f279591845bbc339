//! API error types with IntoResponse
//!
//! Every failure leaves as `{success: false, error: <code>, message: <text>}`
//! with a fixed message per status code. Details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use trivia_core::ValidationError;

use crate::db::StoreError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or missing input (400)
    BadRequest(String),

    /// Entity, page, or route absent (404)
    NotFound(String),

    /// Route exists but not for this method (405)
    MethodNotAllowed,

    /// Well-formed input the store refused to write (422)
    Unprocessable(String),

    /// Unexpected store read fault (500)
    Internal(String),
}

/// Uniform error envelope
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: u16,
    pub message: &'static str,
}

impl ApiError {
    /// Store fault on a read path
    pub fn read(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }

    /// Store fault on a write path
    pub fn write(err: StoreError) -> Self {
        Self::Unprocessable(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed client-facing message for the status code
    pub fn message(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "Bad Request",
            Self::NotFound(_) => "Not found",
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::Unprocessable(_) => "Unprocessable Entity",
            Self::Internal(_) => "Internal Server Error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::Internal(detail) => tracing::error!("Internal error: {}", detail),
            Self::Unprocessable(detail) => tracing::warn!("Unprocessable: {}", detail),
            Self::BadRequest(detail) => tracing::warn!("Bad request: {}", detail),
            Self::NotFound(detail) => tracing::debug!("Not found: {}", detail),
            Self::MethodNotAllowed => {}
        }

        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.message(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::BadRequest(e.to_string())
    }
}
