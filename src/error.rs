use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, info, warn};

/// Failures raised by a [`crate::db::ProductRepository`].
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The not-found sentinel; handlers turn it into `204 No Content`.
    #[error("product {0} not found")]
    NotFound(String),

    #[error("product {0} already exists")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Every way a request can fail, already resolved to its response.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("request body could not be read")]
    UnreadableBody,

    #[error("Invalid Data Format")]
    InvalidDataFormat,

    #[error("{0}")]
    BadRequest(String),

    #[error("product not found")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnreadableBody | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidDataFormat => StatusCode::EXPECTATION_FAILED,
            AppError::NotFound => StatusCode::NO_CONTENT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => AppError::NotFound,
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            AppError::InvalidDataFormat => (status, "Invalid Data Format").into_response(),
            AppError::BadRequest(message) => (status, message).into_response(),
            AppError::Internal(detail) => {
                // Detail stays in the log; clients only see the status.
                error!(%detail, "Request failed");
                status.into_response()
            }
            AppError::UnreadableBody => {
                warn!("Rejected request with unreadable body");
                status.into_response()
            }
            AppError::NotFound => {
                info!("Product not found");
                status.into_response()
            }
        }
    }
}
