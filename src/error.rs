//! HTTP-facing error type.
//!
//! Handlers return `Result<_, ApiError>`; the response body is always
//! `{"error": "<message>"}`.

use crate::storage::StorageError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

pub const NO_PROVIDED_TERM: &str = "No term provided";
pub const SEEDING_FAILED: &str = "An error occurred during seeding";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{}", NO_PROVIDED_TERM)]
    NoTermProvided,

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("{}", SEEDING_FAILED)]
    SeedingFailed(#[source] anyhow::Error),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NoTermProvided | Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::Validation { .. }) => StatusCode::BAD_REQUEST,
            Self::Storage(StorageError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::InvalidPattern(_) | Self::SeedingFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::SeedingFailed(cause) => tracing::error!("Seeding failed: {:#}", cause),
            _ if status.is_server_error() => tracing::error!("Request failed: {}", self),
            _ => tracing::debug!("Request rejected ({}): {}", status, self),
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
