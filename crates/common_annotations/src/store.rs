//! Dataset persistence. Saves go through a temp file in the target directory
//! followed by an atomic rename, so a crashed save never truncates the
//! dataset readers and the reverse conversion depend on.

use crate::model::Dataset;
use color_eyre::eyre::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Reads and parses the dataset file.
///
/// # Errors
///
/// Fails if the file cannot be read or does not parse as a dataset.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let contents = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read dataset at {}", path.display()))?;
    let dataset: Dataset = serde_json::from_str(&contents)
        .wrap_err_with(|| format!("failed to parse dataset at {}", path.display()))?;
    Ok(dataset)
}

/// Serializes and atomically replaces the dataset file.
///
/// # Errors
///
/// Fails if serialization, the temp-file write, or the final rename fails.
pub fn save_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    let json = serde_json::to_string_pretty(dataset).wrap_err("failed to serialize dataset")?;

    let directory = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp_file = tempfile::NamedTempFile::new_in(directory)
        .wrap_err_with(|| format!("failed to create temp file in {}", directory.display()))?;
    std::io::Write::write_all(&mut temp_file, json.as_bytes())
        .wrap_err("failed to write dataset temp file")?;
    temp_file
        .persist(path)
        .wrap_err_with(|| format!("failed to replace dataset at {}", path.display()))?;

    info!(
        "saved dataset: {} images, {} regions",
        dataset.images.len(),
        dataset.annotations.len()
    );
    Ok(())
}
