//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use textbook_scan_core::{ActionError, PortError};
use tracing::error;
use utoipa::ToSchema;

use crate::config::ConfigError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A classified failure returned by one of the actions.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration Error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        Self::Action(ActionError::Port(err))
    }
}

/// The body returned for every failed operation.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// One of `VALIDATION`, `UNAUTHORIZED`, `NOT_FOUND`, `INTERNAL`.
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Action(ActionError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Action(ActionError::Unauthorized(_)) => StatusCode::UNAUTHORIZED,
            Self::Action(ActionError::NotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::Action(err @ (ActionError::Validation(_)
            | ActionError::Unauthorized(_)
            | ActionError::NotFound(_))) => ErrorBody {
                code: err.code().to_string(),
                message: err.to_string(),
            },
            other => {
                // Internal details stay in the logs.
                error!("Request failed: {:?}", other);
                ErrorBody {
                    code: "INTERNAL".to_string(),
                    message: "An internal error occurred".to_string(),
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_errors_map_to_http_status() {
        let cases = [
            (ActionError::Validation("title must not be empty".into()), StatusCode::BAD_REQUEST),
            (ActionError::Unauthorized("Unauthorized".into()), StatusCode::UNAUTHORIZED),
            (ActionError::not_found("Page"), StatusCode::NOT_FOUND),
            (
                ActionError::Port(PortError::Unexpected("pool closed".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }
}
