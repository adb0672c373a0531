use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ImagesError {
    #[error("invalid file name: {0}")]
    InvalidPath(String),

    #[error("image not found")]
    NotFound,

    #[error("access denied")]
    AccessDenied,

    #[error(transparent)]
    Internal(#[from] eyre::Report),
}

fn log_images_failure(error: &ImagesError) {
    match error {
        ImagesError::InvalidPath(name) => warn!("Invalid image file name requested: {}", name),
        ImagesError::NotFound => warn!("Requested image not found"),
        ImagesError::AccessDenied => warn!("Access denied for requested image"),
        ImagesError::Internal(e) => error!("Internal error serving image: {:?}", e),
    }
}

impl IntoResponse for ImagesError {
    fn into_response(self) -> Response {
        log_images_failure(&self);

        let (status, error_message) = match &self {
            Self::InvalidPath(_) => (
                StatusCode::BAD_REQUEST,
                "The requested file name is invalid.".to_string(),
            ),
            Self::NotFound => (StatusCode::NOT_FOUND, "Image not found.".to_string()),
            Self::AccessDenied => (
                StatusCode::FORBIDDEN,
                "Permission denied for the requested image.".to_string(),
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
