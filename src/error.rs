//! Application error types with HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Application-level errors for nosograph.
#[derive(Error, Debug)]
pub enum AppError {
    // Neo4j errors
    #[error("Neo4j connection error: {0}")]
    Connection(#[from] neo4rs::Error),

    #[error("Neo4j query error: {message}")]
    Query { message: String, query: String },

    // Request errors
    #[error("Bad input: {0}")]
    BadInput(String),

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Title '{title}' matches {count} entities, expected exactly one")]
    AmbiguousTitle { title: String, count: usize },

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status and stable machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::BadInput(_) => (StatusCode::BAD_REQUEST, "BAD_INPUT"),
            AppError::EntityNotFound(_) => (StatusCode::NOT_FOUND, "ENTITY_NOT_FOUND"),
            AppError::AmbiguousTitle { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "AMBIGUOUS_TITLE")
            }
            AppError::Connection(_) => (StatusCode::BAD_GATEWAY, "STORE_UNAVAILABLE"),
            AppError::Query { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "QUERY_ERROR"),
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

/// JSON body returned for failed requests.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            match &self {
                AppError::Query { query, .. } => {
                    tracing::error!(error = %self, query = %query, "request failed")
                }
                _ => tracing::error!(error = %self, "request failed"),
            }
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let body = ErrorBody {
            error: code,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
