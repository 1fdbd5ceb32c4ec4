use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;

/// Error returned by every HTTP handler; rendered as `{"error": {"code", "message"}}`.
///
/// WebSocket sessions report failures as progress events instead (see `session::machine`).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Model error: {0}")]
    Llm(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Forbidden { .. } => AppError::Forbidden(err.to_string()),
            AuthError::Lookup(e) => AppError::Database(e),
            AuthError::InvalidToken | AuthError::UnknownUser => AppError::Unauthorized,
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::Validation(format!("Invalid multipart body: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "A valid bearer token is required".to_string(),
            ),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Job storage query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Job storage is unavailable".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!(reason = %msg, "Model call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "MODEL_ERROR",
                    "The resume model could not process this request".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!(error = ?e, "Unhandled error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Something went wrong on our side".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
