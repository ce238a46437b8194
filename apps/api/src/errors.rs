use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Only whole-invocation failures live here. Per-resume degradations (scorer
/// unavailable, failed cache write) never become errors — they are absorbed
/// inside the orchestrator.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Job ID is required")]
    MissingJobId,

    #[error("Failed to fetch job details")]
    JobNotFound,

    #[error("Failed to fetch resumes")]
    ResumesUnavailable,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingJobId => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::JobNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::ResumesUnavailable => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
