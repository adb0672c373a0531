//! HTTP handlers for single and batch text recognition.

use crate::routes::recognition::error::RecognitionError;
use crate::routes::recognition::interfaces::{
    BatchRecognizeRequest, BatchRecognizeResponse, RecognizeRequest, RecognizeResponse,
};
use crate::routes::recognition::service::{recognize_many, recognize_one};
use crate::state::ApiState;
use axum::Json;
use axum::extract::State;

/// Recognize the text in one user-drawn region.
///
/// # Errors
///
/// Returns a `RecognitionError` for undecodable image data or an engine
/// failure.
#[utoipa::path(
    post,
    path = "/api/ocr",
    tag = "Recognition",
    request_body = RecognizeRequest,
    responses(
        (status = 200, description = "Recognized text for the region.", body = RecognizeResponse),
        (status = 400, description = "Missing or undecodable image data."),
        (status = 500, description = "The recognition engine failed."),
    )
)]
pub async fn recognize_single(
    State(state): State<ApiState>,
    Json(request): Json<RecognizeRequest>,
) -> Result<Json<RecognizeResponse>, RecognitionError> {
    let text = recognize_one(&state.dispatcher, &request.image).await?;
    Ok(Json(RecognizeResponse { text }))
}

/// Recognize the text in a batch of user-drawn regions.
///
/// The engine runs once over the whole batch; results are correlated back to
/// the caller-supplied ids, and regions the engine produced no output for are
/// simply absent from the response.
///
/// # Errors
///
/// Returns a `RecognitionError` for an empty batch, undecodable image data,
/// or an engine failure.
#[utoipa::path(
    post,
    path = "/api/ocr-batch",
    tag = "Recognition",
    request_body = BatchRecognizeRequest,
    responses(
        (status = 200, description = "Recognized text per correlated region.", body = BatchRecognizeResponse),
        (status = 400, description = "Empty batch or undecodable image data."),
        (status = 500, description = "The batch could not be spooled or the engine failed."),
    )
)]
pub async fn recognize_batch(
    State(state): State<ApiState>,
    Json(request): Json<BatchRecognizeRequest>,
) -> Result<Json<BatchRecognizeResponse>, RecognitionError> {
    let results = recognize_many(&state.dispatcher, request.images).await?;
    Ok(Json(BatchRecognizeResponse { results }))
}
