use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use memo_core::StoreError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors that can abort server startup
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open notes database: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type RestResult<T> = Result<T, RestError>;

/// Errors returned from REST handlers
///
/// Messages are user-facing; database errors are logged server-side and
/// collapse to a generic 500 body.
#[derive(Debug, Error)]
pub enum RestError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal(String),
}

impl From<StoreError> for RestError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmptyContent => RestError::Validation(err.to_string()),
            StoreError::Database(e) => RestError::Internal(e.to_string()),
        }
    }
}

impl From<rusqlite::Error> for RestError {
    fn from(err: rusqlite::Error) -> Self {
        RestError::Internal(err.to_string())
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = match self {
            RestError::Validation(_) => StatusCode::BAD_REQUEST,
            RestError::NotFound(_) => StatusCode::NOT_FOUND,
            RestError::Internal(ref detail) => {
                error!("request failed: {detail}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
