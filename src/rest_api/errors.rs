//! # REST API Errors
//!
//! Error types for the REST API module and their HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::CatalogError;

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Error)]
pub enum RestError {
    /// Request body missing, malformed, or of the wrong shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Path parameter is not a valid identifier
    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    /// Request task did not run to completion
    #[error("Internal error: {0}")]
    Internal(String),

    /// Failure reported by the book service
    #[error("{0}")]
    Catalog(#[from] CatalogError),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,

            RestError::Catalog(err) => match err {
                // 400 Bad Request
                CatalogError::InvalidField { .. }
                | CatalogError::InvalidYear { .. }
                | CatalogError::TooManyCategories { .. }
                | CatalogError::DuplicateCategory(_)
                | CatalogError::UnknownCategory(_) => StatusCode::BAD_REQUEST,

                // 404 Not Found
                CatalogError::NotFound(_) => StatusCode::NOT_FOUND,

                // 409 Conflict
                CatalogError::ConcurrentModification(_) => StatusCode::CONFLICT,

                // 500 Internal Server Error
                CatalogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<RestError> for ErrorResponse {
    fn from(err: RestError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
