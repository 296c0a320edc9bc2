//! Error types for web handlers.
//!
//! This module bridges [`CatalogError`] and HTTP responses, implementing
//! Axum's `IntoResponse` trait.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campus_events_core::{CatalogError, EntityKind};
use serde::Serialize;
use std::fmt;

/// Application error type for web handlers.
///
/// Carries the status, a machine-readable code and a user-facing message.
/// Backend failures keep their cause as `source` for logging; it is never
/// sent to the client.
///
/// # Examples
///
/// ```ignore
/// async fn handler(Path(id): Path<u64>) -> Result<Json<Event>, AppError> {
///     let event = find_event(id).await?
///         .ok_or_else(|| AppError::not_found(EntityKind::Event))?;
///     Ok(Json(event))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for client error handling)
    code: &'static str,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: &'static str) -> Self {
        Self {
            status,
            message,
            code,
            source: None,
        }
    }

    /// Create a new error with a source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message.into(), "BAD_REQUEST")
    }

    /// Create a 400 error for input that failed validation.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message.into(), "VALIDATION_ERROR")
    }

    /// Create a 401 Unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message.into(), "UNAUTHORIZED")
    }

    /// Create a 404 Not Found error, e.g. "Event not found".
    #[must_use]
    pub fn not_found(kind: EntityKind) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{kind} not found"),
            "NOT_FOUND",
        )
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR",
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Error code (for client error handling).
    code: &'static str,
    /// Human-readable error message.
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log internal errors
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    error = %source,
                    "Internal server error"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    "Internal server error"
                );
            }
        }

        let body = ErrorResponse {
            code: self.code,
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(kind) => Self::not_found(kind),
            CatalogError::DuplicateRegistration => Self::new(
                StatusCode::BAD_REQUEST,
                err.to_string(),
                "DUPLICATE_REGISTRATION",
            ),
            CatalogError::CapacityExceeded => Self::new(
                StatusCode::BAD_REQUEST,
                err.to_string(),
                "CAPACITY_EXCEEDED",
            ),
            CatalogError::DuplicateUsername => Self::new(
                StatusCode::BAD_REQUEST,
                err.to_string(),
                "DUPLICATE_USERNAME",
            ),
            CatalogError::Validation { .. } => Self::validation(err.to_string()),
            CatalogError::Unauthorized => Self::unauthorized(err.to_string()),
            CatalogError::Storage(source) => {
                Self::internal("An internal error occurred").with_source(source.into())
            }
        }
    }
}
