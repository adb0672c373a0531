use crate::settings::structs::AppSettings;
use std::path::{Path, PathBuf, absolute};
use std::sync::LazyLock;

/// Load the app settings from YAML + environment variables.
///
/// # Errors
///
/// Fails if the settings file is missing or does not deserialize.
pub fn load_app_settings() -> color_eyre::Result<AppSettings> {
    let config_path = Path::new("config/settings.yaml").canonicalize()?;
    load_app_settings_from(&config_path)
}

/// Load the app settings from an explicit file path.
///
/// # Errors
///
/// Fails if the settings file does not deserialize into `AppSettings`.
pub fn load_app_settings_from(config_path: &Path) -> color_eyre::Result<AppSettings> {
    let builder = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );
    Ok(builder.build()?.try_deserialize::<AppSettings>()?)
}

/// Immutable global settings, initialized on first access.
pub static SETTINGS: LazyLock<AppSettings> =
    LazyLock::new(|| load_app_settings().expect("Failed to load app settings"));

pub static IMAGES_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
    absolute(&SETTINGS.directories.images_folder).expect("Invalid images dir")
});

pub static DATASET_PATH: LazyLock<PathBuf> = LazyLock::new(|| {
    absolute(&SETTINGS.directories.dataset_file).expect("Invalid dataset path")
});

pub static TEMP_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
    absolute(&SETTINGS.directories.temp_folder).expect("Invalid temp dir")
});

#[must_use]
pub fn settings() -> &'static AppSettings {
    &SETTINGS
}

#[must_use]
pub fn images_dir() -> &'static Path {
    &IMAGES_DIR
}

#[must_use]
pub fn dataset_path() -> &'static Path {
    &DATASET_PATH
}

#[must_use]
pub fn temp_dir() -> &'static Path {
    &TEMP_DIR
}

#[cfg(test)]
mod tests {
    use super::load_app_settings_from;
    use std::io::Write;

    #[test]
    fn settings_deserialize_from_yaml() -> color_eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("settings.yaml");
        let mut file = std::fs::File::create(&path)?;
        write!(
            file,
            r#"
directories:
  images_folder: "data/batch1"
  dataset_file: "data/batch1/json/merged_dataset.json"
  temp_folder: "data/tmp"
logging:
  level: "info"
api:
  host: "127.0.0.1"
  port: 3000
  allowed_origins: ["*"]
  max_body_bytes: 52428800
ocr:
  program: "python"
  args: ["scripts/recognize.py"]
  timeout_s: 120
  write_concurrency: 4
  temp_prefix: "ocr_"
annotations:
  category_id: 1
  label: "trailer_id"
"#
        )?;

        let settings = load_app_settings_from(&path)?;
        assert_eq!(settings.api.port, 3000);
        assert_eq!(settings.ocr.write_concurrency, 4);
        assert_eq!(settings.annotations.label, "trailer_id");
        Ok(())
    }
}
