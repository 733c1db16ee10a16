//! Error responses and start-up failures for the Folio API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Failures that stop the server from starting or serving.
#[derive(Debug, Error)]
pub enum AppError {
    /// `HOST` or `PORT` is unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// The listener could not bind or accept.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// `{error, message}` body of every non-2xx response produced here.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable code such as `validation_error`.
    pub error: &'static str,
    /// Text suitable for showing next to the review form.
    pub message: String,
}

/// Carries a `DomainError` out of a handler and picks its status code.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self.0 {
            DomainError::Validation(message) => {
                (StatusCode::BAD_REQUEST, "validation_error", message)
            }
            DomainError::StoreWrite(message) => {
                (StatusCode::BAD_GATEWAY, "store_write_error", message)
            }
            DomainError::StoreRead(message) => {
                (StatusCode::SERVICE_UNAVAILABLE, "store_read_error", message)
            }
        };

        if status.is_server_error() {
            tracing::warn!(%status, error_code, %message, "request failed at the store");
        }

        let body = ErrorBody {
            error: error_code,
            message,
        };

        (status, Json(body)).into_response()
    }
}
