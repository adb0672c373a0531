use crate::routes::images::error::ImagesError;
use axum::{
    body::Body,
    http::{StatusCode, header},
};
use color_eyre::Report;
use common_annotations::images_dir;
use http::Response;
use std::path::Path;
use tokio::fs::File;
use tokio_util::codec::{BytesCodec, FramedRead};
use tracing::{debug, warn};

/// Streams one dataset image by file name.
///
/// Only the base name of the request is honored, and the resolved path is
/// canonicalized and checked against the images directory before any read, so
/// a crafted file name can never escape it.
pub async fn stream_image(file_name: &str) -> Result<Response<Body>, ImagesError> {
    debug!("local file requested: {}", file_name);

    // --- 1. Security & Path Validation ---
    let Some(base_name) = Path::new(file_name).file_name() else {
        return Err(ImagesError::InvalidPath(file_name.to_string()));
    };

    let images_dir_canon = images_dir()
        .canonicalize()
        .map_err(|e| Report::new(e).wrap_err("Failed to canonicalize images directory"))?;

    let file_path = images_dir().join(base_name);
    let file_canon = match file_path.canonicalize() {
        Ok(path) => path,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("image not found at path: {}", file_path.display());
            return Err(ImagesError::NotFound);
        }
        Err(e) => return Err(Report::new(e).wrap_err("Failed to canonicalize path").into()),
    };

    if !file_canon.starts_with(&images_dir_canon) {
        warn!("Blocked directory traversal attempt for: {}", file_name);
        return Err(ImagesError::InvalidPath(file_name.to_string()));
    }

    // --- 2. File Access ---
    let file = match File::open(&file_canon).await {
        Ok(file) => file,
        Err(e) => match e.kind() {
            std::io::ErrorKind::NotFound => Err(ImagesError::NotFound),
            std::io::ErrorKind::PermissionDenied => Err(ImagesError::AccessDenied),
            _ => Err(Report::new(e).wrap_err("Failed to open image file").into()),
        }?,
    };

    // --- 3. Build the Streaming Response ---
    let stream = FramedRead::new(file, BytesCodec::new());
    let body = Body::from_stream(stream);
    let mime_type = mime_guess::from_path(&file_canon).first_or_octet_stream();
    let display_name = base_name.to_str().unwrap_or("image");
    let disposition = format!("inline; filename=\"{display_name}\"");
    let disposition_header = header::HeaderValue::from_str(&disposition)
        .unwrap_or(header::HeaderValue::from_static("inline"));

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime_type.as_ref())
        .header(header::CONTENT_DISPOSITION, disposition_header)
        .body(body)
        .map_err(|e| Report::new(e).wrap_err("Failed to build response"))?)
}
