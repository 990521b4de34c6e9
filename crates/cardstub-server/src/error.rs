// SPDX-License-Identifier: BUSL-1.1
//! HTTP error mapping.
//!
//! Routes domain validation failures to the stub's wire contract: 401 for a
//! credential shape mismatch, 400 for everything else the client got wrong.
//! Bodies are short plain text, not a JSON envelope — the clients under test
//! expect the upstream service's terse rejections.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use cardstub_core::ValidationError;

/// Handler-level error type implementing [`IntoResponse`].
#[derive(Error, Debug)]
pub enum ApiError {
    /// Credential shape check failed (401). No store was touched.
    #[error("invalid key")]
    Unauthorized,

    /// Missing or malformed request value (400).
    #[error("{0}")]
    InvalidInput(ValidationError),

    /// The request body could not be read or parsed (400).
    #[error("invalid request body")]
    UnreadableBody,

    /// Serialization failure inside the stub (500). Message is logged, not
    /// returned.
    #[error("internal error")]
    Internal(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidCredentials => Self::Unauthorized,
            other => Self::InvalidInput(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidInput(_) | Self::UnreadableBody => StatusCode::BAD_REQUEST,
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "internal stub error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}
