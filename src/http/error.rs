//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::error::RepositoryError;
use crate::models::grid::GridError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Grid invariant violation (duplicate room, double-booked doctor)
    Grid(GridError),
    /// Repository error
    Repository(RepositoryError),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Grid(e) => {
                let msg = e.to_string();
                match e {
                    GridError::DuplicateRoom { .. } => {
                        (StatusCode::CONFLICT, ApiError::new("DUPLICATE_ROOM", msg))
                    }
                    GridError::DoctorDoubleBooked { .. } => (
                        StatusCode::CONFLICT,
                        ApiError::new("DOCTOR_DOUBLE_BOOKED", msg),
                    ),
                    GridError::UnknownSlot(_) | GridError::UnknownAssignment { .. } => {
                        (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg))
                    }
                    GridError::UnresolvableRoomId { .. } => (
                        StatusCode::BAD_REQUEST,
                        ApiError::new("UNRESOLVABLE_ROOM_ID", msg),
                    ),
                }
            }
            AppError::Repository(e) => {
                let msg = e.to_string();
                match e {
                    // Directory outages disable dependent actions; they are
                    // never an internal failure of this service.
                    RepositoryError::FetchError { .. } => (
                        StatusCode::SERVICE_UNAVAILABLE,
                        ApiError::new("DIRECTORY_UNAVAILABLE", msg),
                    ),
                    RepositoryError::NotFound { .. } => {
                        (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg))
                    }
                    RepositoryError::ValidationError { .. } => {
                        (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
                    }
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiError::new("REPOSITORY_ERROR", msg),
                    ),
                }
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<GridError> for AppError {
    fn from(err: GridError) -> Self {
        AppError::Grid(err)
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
