//! HTTP request handlers

pub mod entities;
pub mod health;
pub mod i18n;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, error};
use venuedesk_core::Error;
use venuedesk_i18n::I18nError;

/// Error returned by handlers, rendered as `{ "error", "message" }`
#[derive(Debug)]
pub struct ApiError(pub Error);

/// JSON body of an error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error kind
    pub error: &'static str,
    /// Human-readable description
    pub message: String,
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl From<I18nError> for ApiError {
    fn from(error: I18nError) -> Self {
        Self(error.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, kind = self.0.kind(), "request failed");
        } else {
            debug!(error = %self.0, kind = self.0.kind(), "request rejected");
        }

        let body = ErrorBody {
            error: self.0.kind(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;
