use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use log::error;

use crate::render;

/// Request-level failures, mapped onto HTTP statuses by `IntoResponse`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing request input.
    #[error("{0}")]
    Validation(String),
    /// The referenced task does not exist.
    #[error("no task with id {0}")]
    NotFound(i64),
    /// The underlying store failed; not recoverable per-request.
    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(id) => (StatusCode::NOT_FOUND, format!("no task with id {id}")),
            AppError::Storage(e) => {
                error!("storage failure: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Html(render::error_page(status, &message))).into_response()
    }
}
