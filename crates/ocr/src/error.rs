use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("batch contained no images")]
    EmptyBatch,

    #[error("failed to write batch to temp storage")]
    BatchWriteFailed(#[source] std::io::Error),

    #[error("recognition engine failed: {0}")]
    EngineFailed(String),
}
