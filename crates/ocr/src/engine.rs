//! Subprocess wrapper around the external recognition engine.

use crate::error::OcrError;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// How to invoke the engine: a program, its leading arguments (typically the
/// recognition script), and a hard timeout for one invocation.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Runs the engine once over all `paths` and returns its stdout.
    ///
    /// Every path is passed as a discrete argument; no shell ever parses
    /// caller-influenced file names.
    ///
    /// # Errors
    ///
    /// Returns `OcrError::EngineFailed` on spawn failure, nonzero exit,
    /// timeout, or non-UTF-8 stdout.
    pub async fn recognize(&self, paths: &[&Path]) -> Result<String, OcrError> {
        debug!(
            "invoking {} with {} image(s)",
            self.config.program,
            paths.len()
        );

        let mut command = Command::new(&self.config.program);
        command
            .args(&self.config.args)
            .args(paths)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.config.timeout, command.output())
            .await
            .map_err(|_| {
                OcrError::EngineFailed(format!("timed out after {:?}", self.config.timeout))
            })?
            .map_err(|e| {
                OcrError::EngineFailed(format!("failed to run {}: {e}", self.config.program))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::EngineFailed(format!(
                "exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| OcrError::EngineFailed("stdout was not valid UTF-8".into()))
    }
}
