//! Serde mirrors of the two dataset representations: the detection-format
//! dataset stored on disk, and the per-image tasks the interactive UI edits.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Prefix used to encode an image's file name as an addressable path.
pub const IMAGE_PATH_PREFIX: &str = "/data/local-files/?d=";

/// The detection-format dataset as persisted on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub images: Vec<Image>,
    pub annotations: Vec<Region>,
    /// Category vocabulary, passed through opaquely.
    pub categories: Vec<Value>,
}

/// A single source image. Immutable; only read to compute percentage scaling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub id: i64,
    pub file_name: String,
    pub width: i64,
    pub height: i64,
}

/// One pixel-space bounding box with its category and recognized text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub image_id: i64,
    pub category_id: i64,
    /// `[x, y, width, height]` in integer pixels.
    pub bbox: [i64; 4],
    pub area: i64,
    pub iscrowd: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<RegionAttributes>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionAttributes {
    #[serde(default)]
    pub text: Option<String>,
    pub confidence: f64,
}

/// One editable task on the interactive side, one per image.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Task {
    pub id: i64,
    pub data: TaskData,
    pub regions: Vec<RegionAnnotation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskData {
    /// Addressable path encoding the image's `file_name`.
    pub image: String,
}

/// A percentage-space region as drawn or edited in the UI.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegionAnnotation {
    /// Absent for regions the user drew since the last save.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub value: RegionValue,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegionValue {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Single-valued vocabulary tag.
    pub labels: Vec<String>,
    #[serde(default)]
    pub text: String,
}

impl Image {
    /// The addressable path the UI uses to fetch this image.
    #[must_use]
    pub fn task_image_path(&self) -> String {
        format!("{IMAGE_PATH_PREFIX}{}", self.file_name)
    }
}

impl TaskData {
    /// Recovers the image `file_name` from the task's addressable path.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        let (_, file_name) = self.image.split_once("d=")?;
        if file_name.is_empty() {
            None
        } else {
            Some(file_name)
        }
    }
}
