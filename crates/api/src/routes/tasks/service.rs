use crate::routes::tasks::error::TasksError;
use common_annotations::{
    BridgeConfig, Task, dataset_path, load_dataset, save_dataset, settings, to_dataset, to_tasks,
};
use tokio::task;
use tracing::debug;

fn bridge_config() -> BridgeConfig {
    let annotation_settings = &settings().annotations;
    BridgeConfig {
        category_id: annotation_settings.category_id,
        label: annotation_settings.label.clone(),
    }
}

/// Loads the dataset and converts it into interactive tasks.
pub async fn fetch_tasks() -> Result<Vec<Task>, TasksError> {
    let path = dataset_path();
    if !path.exists() {
        return Err(TasksError::DatasetNotFound);
    }

    let dataset = task::spawn_blocking(move || load_dataset(path)).await??;
    let tasks = to_tasks(&dataset, &bridge_config())?;
    debug!("converted {} image(s) into tasks", tasks.len());
    Ok(tasks)
}

/// Converts edited tasks back into the dataset shape and atomically replaces
/// the stored dataset. The original dataset is re-read first to recover image
/// dimensions and the category vocabulary.
pub async fn persist_tasks(tasks: Vec<Task>) -> Result<(), TasksError> {
    let path = dataset_path();
    if !path.exists() {
        return Err(TasksError::DatasetNotFound);
    }

    let original = task::spawn_blocking(move || load_dataset(path)).await??;
    let updated = to_dataset(&tasks, &original, &bridge_config())?;
    task::spawn_blocking(move || save_dataset(path, &updated)).await??;
    Ok(())
}
