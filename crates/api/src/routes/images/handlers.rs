use crate::routes::images::error::ImagesError;
use crate::routes::images::interfaces::LocalFileQuery;
use crate::routes::images::service::stream_image;
use axum::extract::Query;
use axum::response::IntoResponse;

/// Serve one dataset image by file name.
///
/// The file name is the `d` query parameter of a task's image path; it is
/// reduced to its base name and canonicalized before any file read.
#[utoipa::path(
    get,
    path = "/data/local-files",
    params(
        ("d" = String, Query, description = "File name of the image to serve")
    ),
    responses(
        (status = 200, description = "Image streamed successfully.", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 400, description = "Invalid file name, such as a directory traversal attempt."),
        (status = 403, description = "Permission denied when reading the image."),
        (status = 404, description = "The requested image could not be found."),
        (status = 500, description = "An internal server error occurred."),
    )
)]
pub async fn get_local_file(
    Query(query): Query<LocalFileQuery>,
) -> Result<impl IntoResponse, ImagesError> {
    let response = stream_image(&query.d).await?;
    Ok(response)
}
