//! Bidirectional conversion between the stored detection-format dataset and
//! the per-image tasks the interactive UI edits.
//!
//! Both directions are pure functions of their inputs; no entity is mutated
//! in place. Image dimensions and the category vocabulary only exist on the
//! dataset side, so the reverse conversion re-reads the original dataset to
//! recover them.

use crate::geometry::{self, GeometryError, PercentBox};
use crate::model::{
    Dataset, Region, RegionAnnotation, RegionAttributes, RegionValue, Task, TaskData,
};
use std::collections::HashMap;
use tracing::warn;

/// Write-back configuration: the vocabulary tag embedded in tasks and the
/// category every region is assigned on the reverse conversion.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub category_id: i64,
    pub label: String,
}

/// Converts a dataset into one task per image, in `dataset.images` order.
///
/// Images with zero regions still produce a task with an empty region list.
///
/// # Errors
///
/// Propagates `GeometryError` from the percentage conversion; geometry
/// corruption aborts the whole conversion.
pub fn to_tasks(dataset: &Dataset, config: &BridgeConfig) -> Result<Vec<Task>, GeometryError> {
    let mut regions_by_image: HashMap<i64, Vec<&Region>> = HashMap::new();
    for region in &dataset.annotations {
        regions_by_image
            .entry(region.image_id)
            .or_default()
            .push(region);
    }

    let mut tasks = Vec::with_capacity(dataset.images.len());
    for image in &dataset.images {
        let regions = regions_by_image
            .get(&image.id)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut annotations = Vec::with_capacity(regions.len());
        for region in regions {
            let percent = geometry::to_percent(region.bbox, image.width, image.height)?;
            let text = region
                .attributes
                .as_ref()
                .and_then(|a| a.text.clone())
                .unwrap_or_default();
            annotations.push(RegionAnnotation {
                id: region.id,
                value: RegionValue {
                    x: percent.x,
                    y: percent.y,
                    width: percent.width,
                    height: percent.height,
                    labels: vec![config.label.clone()],
                    text,
                },
            });
        }

        tasks.push(Task {
            id: image.id,
            data: TaskData {
                image: image.task_image_path(),
            },
            regions: annotations,
        });
    }
    Ok(tasks)
}

/// Converts edited tasks back into a dataset, using `original` to recover
/// image dimensions and the category vocabulary.
///
/// Tasks whose file name has no matching image in the original dataset are
/// skipped with a warning; their edits are lost. Regions without a
/// server-assigned id receive a fresh one, strictly greater than any id the
/// dataset has ever issued.
///
/// # Errors
///
/// Propagates `GeometryError` from the pixel conversion; geometry corruption
/// aborts the whole conversion.
pub fn to_dataset(
    tasks: &[Task],
    original: &Dataset,
    config: &BridgeConfig,
) -> Result<Dataset, GeometryError> {
    let images_by_file_name: HashMap<&str, &crate::model::Image> = original
        .images
        .iter()
        .map(|image| (image.file_name.as_str(), image))
        .collect();

    let mut next_id = next_region_id(tasks, original);
    let mut images = Vec::new();
    let mut annotations = Vec::new();

    for task in tasks {
        let Some(file_name) = task.data.file_name() else {
            warn!("task {} has no decodable file name, skipping", task.id);
            continue;
        };
        let Some(image) = images_by_file_name.get(file_name) else {
            warn!("image not found in original dataset: {file_name}, skipping task");
            continue;
        };

        images.push((*image).clone());

        for annotation in &task.regions {
            let percent = PercentBox {
                x: annotation.value.x,
                y: annotation.value.y,
                width: annotation.value.width,
                height: annotation.value.height,
            };
            let pixels = geometry::to_pixels(&percent, image.width, image.height)?;

            let id = annotation.id.unwrap_or_else(|| {
                let fresh = next_id;
                next_id += 1;
                fresh
            });
            annotations.push(Region {
                id: Some(id),
                image_id: image.id,
                category_id: config.category_id,
                bbox: pixels.bbox(),
                area: pixels.area,
                iscrowd: 0,
                attributes: Some(RegionAttributes {
                    text: Some(annotation.value.text.clone()),
                    confidence: 1.0,
                }),
            });
        }
    }

    Ok(Dataset {
        images,
        annotations,
        categories: original.categories.clone(),
    })
}

/// First id available for newly drawn regions: strictly greater than every
/// id present in the original dataset or carried by the edited tasks.
fn next_region_id(tasks: &[Task], original: &Dataset) -> i64 {
    let stored_max = original.annotations.iter().filter_map(|r| r.id).max();
    let task_max = tasks
        .iter()
        .flat_map(|t| t.regions.iter().filter_map(|r| r.id))
        .max();
    stored_max.unwrap_or(0).max(task_max.unwrap_or(0)) + 1
}
