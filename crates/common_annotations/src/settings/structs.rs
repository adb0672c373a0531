use serde::Deserialize;

/// Overall application configuration structure.
#[derive(Debug, Deserialize)]
pub struct AppSettings {
    pub directories: DirectoriesSettings,
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub ocr: OcrSettings,
    pub annotations: AnnotationSettings,
}

/// Defines paths for images, the dataset file, and temp storage.
#[derive(Debug, Deserialize)]
pub struct DirectoriesSettings {
    /// Folder with the source images referenced by the dataset.
    pub images_folder: String,
    /// The detection-format dataset file.
    pub dataset_file: String,
    /// Root directory for temporary recognition crops.
    pub temp_folder: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize)]
pub struct ApiSettings {
    pub host: String,
    pub port: u32,
    pub allowed_origins: Vec<String>,
    /// Maximum accepted JSON body size; batch payloads carry inline images.
    pub max_body_bytes: usize,
}

/// Configuration for the external recognition engine.
#[derive(Debug, Deserialize)]
pub struct OcrSettings {
    /// Program to invoke, e.g. `python`.
    pub program: String,
    /// Leading arguments, e.g. the recognition script path. Image paths are
    /// appended as discrete arguments after these.
    pub args: Vec<String>,
    pub timeout_s: u64,
    /// Bound on concurrent temp-file writes per batch.
    pub write_concurrency: usize,
    /// File-name prefix for spooled crops.
    pub temp_prefix: String,
}

/// Write-back behavior of the format bridge.
#[derive(Debug, Deserialize)]
pub struct AnnotationSettings {
    /// Category assigned to every region on the reverse conversion.
    pub category_id: i64,
    /// Vocabulary tag embedded in interactive tasks.
    pub label: String,
}
