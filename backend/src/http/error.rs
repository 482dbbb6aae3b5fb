//! HTTP error handling.
//!
//! Failures are rendered as a failure [`Envelope`] with the status code
//! matching the error kind: not found → 404, conflicts, full schedules and
//! invalid input → 400, anything else → 500. Requests axum cannot extract
//! (bad JSON, missing query parameters, non-numeric ids) are reported as 400.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error};

use super::dto::Envelope;
use crate::db::repository::{ErrorKind, RepositoryError};

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Request could not be parsed into the handler's input
    BadRequest(String),
    /// Repository error
    Repository(RepositoryError),
}

impl AppError {
    /// Status code and client-facing message for this error.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Repository(e) => {
                let status = match e.kind() {
                    ErrorKind::NotFound => StatusCode::NOT_FOUND,
                    ErrorKind::Conflict | ErrorKind::CapacityExceeded | ErrorKind::Validation => {
                        StatusCode::BAD_REQUEST
                    }
                    ErrorKind::Configuration | ErrorKind::Internal => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, e.message().to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        match &self {
            _ if status.is_server_error() => error!(?self, "request failed"),
            AppError::Repository(e) => debug!(%status, context = %e.context(), "{}", message),
            AppError::BadRequest(_) => debug!(%status, "rejected request: {}", message),
        }

        (status, Json(Envelope::failure(message))).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
