//! HTTP handlers for dataset fetch and persist.

use crate::routes::tasks::error::TasksError;
use crate::routes::tasks::interfaces::SaveResponse;
use crate::routes::tasks::service::{fetch_tasks, persist_tasks};
use axum::Json;
use common_annotations::Task;

/// Fetch the dataset as interactive tasks.
///
/// # Errors
///
/// Returns a `TasksError` if the dataset is missing, unreadable, or contains
/// invalid geometry.
#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "Tasks",
    responses(
        (status = 200, description = "The dataset converted into one task per image.", body = Vec<Task>),
        (status = 404, description = "The dataset file was not found."),
        (status = 500, description = "The dataset could not be read or converted."),
    )
)]
pub async fn get_tasks() -> Result<Json<Vec<Task>>, TasksError> {
    let tasks = fetch_tasks().await?;
    Ok(Json(tasks))
}

/// Persist edited tasks back into the dataset.
///
/// # Errors
///
/// Returns a `TasksError` if the original dataset is missing or the
/// conversion/write fails.
#[utoipa::path(
    post,
    path = "/api/save",
    tag = "Tasks",
    request_body = Vec<Task>,
    responses(
        (status = 200, description = "The dataset was saved.", body = SaveResponse),
        (status = 404, description = "The original dataset file was not found."),
        (status = 500, description = "The tasks could not be converted or written."),
    )
)]
pub async fn save_tasks(Json(tasks): Json<Vec<Task>>) -> Result<Json<SaveResponse>, TasksError> {
    persist_tasks(tasks).await?;
    Ok(Json(SaveResponse { success: true }))
}
