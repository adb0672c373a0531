use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use common_annotations::GeometryError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum TasksError {
    #[error("dataset file not found")]
    DatasetNotFound,

    #[error("invalid geometry in dataset")]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Internal(#[from] eyre::Report),
}

fn log_tasks_failure(error: &TasksError) {
    match error {
        TasksError::DatasetNotFound => error!("Dataset file not found"),
        TasksError::Geometry(e) => error!("Geometry conversion failed: {}", e),
        TasksError::Internal(e) => error!("Internal error in tasks route: {:?}", e),
    }
}

impl IntoResponse for TasksError {
    fn into_response(self) -> Response {
        log_tasks_failure(&self);

        let (status, error_message) = match &self {
            Self::DatasetNotFound => (
                StatusCode::NOT_FOUND,
                "The dataset file was not found.".to_string(),
            ),
            Self::Geometry(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "The dataset contains invalid geometry.".to_string(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected internal error occurred.".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<tokio::task::JoinError> for TasksError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(eyre::Report::new(err))
    }
}
