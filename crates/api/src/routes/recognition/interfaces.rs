use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct RecognizeRequest {
    /// Image bytes as a `data:image/...;base64,` URI.
    pub image: String,
}

#[derive(Serialize, ToSchema)]
pub struct RecognizeResponse {
    pub text: String,
}

#[derive(Deserialize, ToSchema)]
pub struct BatchRecognizeRequest {
    pub images: Vec<BatchImage>,
}

#[derive(Deserialize, ToSchema)]
pub struct BatchImage {
    /// Caller-supplied identity the result is correlated back to.
    pub id: String,
    /// Image bytes as a `data:image/...;base64,` URI.
    pub image: String,
}

#[derive(Serialize, ToSchema)]
pub struct BatchRecognizeResponse {
    pub results: Vec<BatchResult>,
}

#[derive(Serialize, ToSchema)]
pub struct BatchResult {
    pub id: String,
    pub text: String,
}
