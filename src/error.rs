//! Error types for the verification server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Geocache Error Enum ==
/// Unified error type for the verification server.
#[derive(Error, Debug)]
pub enum GeocacheError {
    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Request collides with existing state (duplicate user, repeated attempt)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing or unknown principal
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for GeocacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            GeocacheError::NotFound(_) => StatusCode::NOT_FOUND,
            GeocacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GeocacheError::Conflict(_) => StatusCode::CONFLICT,
            GeocacheError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GeocacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the verification server.
pub type Result<T> = std::result::Result<T, GeocacheError>;
