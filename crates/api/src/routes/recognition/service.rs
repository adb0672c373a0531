use crate::routes::recognition::error::RecognitionError;
use crate::routes::recognition::interfaces::{BatchImage, BatchResult};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use ocr::{BatchItem, Dispatcher};

/// Decodes a `data:image/...;base64,` URI into raw bytes. A bare base64
/// payload without the data-URI header is accepted as well.
pub fn decode_data_uri(image: &str) -> Result<Vec<u8>, RecognitionError> {
    let payload = image
        .split_once(";base64,")
        .filter(|(header, _)| header.starts_with("data:image/"))
        .map_or(image, |(_, payload)| payload);
    STANDARD
        .decode(payload.trim())
        .map_err(|_| RecognitionError::InvalidImageData)
}

/// Recognizes one region interactively. A miss (no engine output for the
/// crop) comes back as empty text, not an error.
pub async fn recognize_one(
    dispatcher: &Dispatcher,
    image: &str,
) -> Result<String, RecognitionError> {
    let bytes = decode_data_uri(image)?;
    let text = dispatcher.run_one("region".into(), bytes).await?;
    Ok(text.unwrap_or_default())
}

/// Recognizes a batch of regions; only correlated results are returned.
pub async fn recognize_many(
    dispatcher: &Dispatcher,
    images: Vec<BatchImage>,
) -> Result<Vec<BatchResult>, RecognitionError> {
    if images.is_empty() {
        return Err(RecognitionError::NoImages);
    }

    let items = images
        .into_iter()
        .map(|entry| {
            Ok(BatchItem {
                id: entry.id,
                bytes: decode_data_uri(&entry.image)?,
            })
        })
        .collect::<Result<Vec<_>, RecognitionError>>()?;

    let results = dispatcher.run_batch(items).await?;
    Ok(results
        .into_iter()
        .map(|r| BatchResult {
            id: r.id,
            text: r.text,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_data_uri_with_header() {
        let bytes = decode_data_uri("data:image/png;base64,aGVsbG8=").expect("decode");
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn decodes_bare_base64() {
        let bytes = decode_data_uri("aGVsbG8=").expect("decode");
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn rejects_undecodable_payload() {
        assert!(matches!(
            decode_data_uri("data:image/png;base64,???not-base64???"),
            Err(RecognitionError::InvalidImageData)
        ));
    }

    #[test]
    fn non_image_data_uri_is_not_stripped() {
        // `data:text/...` headers are not recognized, so the whole string is
        // treated as (invalid) base64.
        assert!(decode_data_uri("data:text/plain;base64,aGVsbG8=").is_err());
    }
}
