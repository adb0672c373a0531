use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ocr::OcrError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("no image data provided")]
    NoImages,

    #[error("image payload is not valid base64")]
    InvalidImageData,

    #[error(transparent)]
    Ocr(#[from] OcrError),
}

fn log_recognition_failure(error: &RecognitionError) {
    match error {
        RecognitionError::NoImages => warn!("Recognition request without image data"),
        RecognitionError::InvalidImageData => warn!("Recognition request with undecodable image"),
        RecognitionError::Ocr(e) => error!("Recognition pipeline failed: {}", e),
    }
}

impl IntoResponse for RecognitionError {
    fn into_response(self) -> Response {
        log_recognition_failure(&self);

        let (status, error_message) = match &self {
            Self::NoImages => (
                StatusCode::BAD_REQUEST,
                "No image data provided.".to_string(),
            ),
            Self::InvalidImageData => (
                StatusCode::BAD_REQUEST,
                "The image payload could not be decoded.".to_string(),
            ),
            Self::Ocr(OcrError::EmptyBatch) => (
                StatusCode::BAD_REQUEST,
                "No images provided.".to_string(),
            ),
            Self::Ocr(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "OCR processing failed.".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
