//! HTTP error types for `VaultMock` server.
//!
//! Every lookup miss renders as `404` with a single-field JSON body,
//! `{"error": "<message>"}`, matching what the emulated service's clients
//! expect.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Application-level error returned from HTTP handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    /// No secret matches the requested name (and version).
    #[error("Secret not found")]
    SecretNotFound,
    /// No certificate version carries the requested name.
    #[error("Certificate not found")]
    CertificateNotFound,
    /// No certificate matches the requested name and version.
    #[error("Certificate version not found")]
    CertificateVersionNotFound,
    /// No key matches the requested name (and version).
    #[error("Key not found")]
    KeyNotFound,
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::SecretNotFound
            | Self::CertificateNotFound
            | Self::CertificateVersionNotFound
            | Self::KeyNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "lookup miss");
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), axum::Json(body)).into_response()
    }
}
