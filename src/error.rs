//! Error types for the data layer and the HTTP boundary
//!
//! Repositories return [`DbError`]. Handlers return [`ApiError`], which is the
//! only place failures are turned into HTTP responses:
//! - not-found becomes **404**
//! - every other failure becomes **500** with the raw message
//!
//! All error bodies share one shape: `{"error": "<message>"}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failure raised by a repository operation
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Connectivity loss, constraint violation, malformed statement, ...
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    /// An identifier-keyed statement matched zero rows
    #[error("{0}")]
    NotFound(&'static str),
}

/// Failure returned by an HTTP handler
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Database(sqlx::Error),

    /// Request body could not be decoded into the expected payload
    #[error("{0}")]
    InvalidBody(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::InvalidBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(message) => ApiError::NotFound(message.to_string()),
            DbError::Sqlx(e) => ApiError::Database(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(error = %message, "request failed");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
