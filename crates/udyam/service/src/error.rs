//! Error types for the registration service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use udyam_types::ErrorBody;

use crate::store::StoreError;

/// API-level errors, mapped onto the wire contract by `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// User-correctable input problem; the message is shown verbatim.
    #[error("{0}")]
    Validation(String),

    /// No record under the given identifier.
    #[error("{0}")]
    NotFound(String),

    /// Storage backend failure.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// Anything else unexpected.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            // Server-side failures are logged with detail and answered
            // with a generic message.
            ApiError::Storage(err) => {
                tracing::error!(%err, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Internal(err) => {
                tracing::error!(%err, "unexpected failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
