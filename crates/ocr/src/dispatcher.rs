//! Fans a batch of labeled crops out to the recognition engine.

use crate::correlate::{Recognized, correlate};
use crate::engine::Engine;
use crate::error::OcrError;
use crate::spool::{SpooledImage, TempSpool};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

/// One crop to recognize, keyed by the caller-supplied identity.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub id: String,
    pub bytes: Vec<u8>,
}

/// Runs whole batches through spool -> engine -> correlation, with cleanup
/// guaranteed on every path out.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    spool: Arc<TempSpool>,
    engine: Engine,
    write_concurrency: usize,
}

impl Dispatcher {
    #[must_use]
    pub fn new(spool: TempSpool, engine: Engine, write_concurrency: usize) -> Self {
        Self {
            spool: Arc::new(spool),
            engine,
            write_concurrency: write_concurrency.max(1),
        }
    }

    /// Recognizes a non-empty batch of crops.
    ///
    /// Spool writes run concurrently, bounded by the configured limit. If any
    /// write fails the engine is never invoked and every file already written
    /// is released. The engine runs exactly once over the full batch; its
    /// output is correlated back by identity, so results may come back in any
    /// order and misses are simply absent.
    ///
    /// # Errors
    ///
    /// * `OcrError::EmptyBatch` for an empty input.
    /// * `OcrError::BatchWriteFailed` if any crop cannot be spooled.
    /// * `OcrError::EngineFailed` if the engine invocation fails.
    pub async fn run_batch(&self, items: Vec<BatchItem>) -> Result<Vec<Recognized>, OcrError> {
        if items.is_empty() {
            return Err(OcrError::EmptyBatch);
        }
        debug!("dispatching batch of {} image(s)", items.len());

        // Spooled guards delete their files on drop, which makes cleanup
        // unconditional: early returns and cancellation both release them.
        let spooled = self.spool_batch(items).await?;

        let table: HashMap<String, String> = spooled
            .iter()
            .map(|(id, image)| (image.path().to_string_lossy().into_owned(), id.clone()))
            .collect();
        let paths: Vec<&Path> = spooled.iter().map(|(_, image)| image.path()).collect();

        let stdout = self.engine.recognize(&paths).await?;
        Ok(correlate(&stdout, &table))
    }

    /// Single-item recognition: the batch pipeline specialized to one crop.
    /// `None` means the engine produced no line for the crop.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::run_batch`].
    pub async fn run_one(&self, id: String, bytes: Vec<u8>) -> Result<Option<String>, OcrError> {
        let results = self.run_batch(vec![BatchItem { id, bytes }]).await?;
        Ok(results.into_iter().next().map(|r| r.text))
    }

    /// Writes every crop to the spool, all of them or none.
    async fn spool_batch(
        &self,
        items: Vec<BatchItem>,
    ) -> Result<Vec<(String, SpooledImage)>, OcrError> {
        let limit = Arc::new(Semaphore::new(self.write_concurrency));
        let mut writes = JoinSet::new();
        for item in items {
            let spool = Arc::clone(&self.spool);
            let limit = Arc::clone(&limit);
            writes.spawn(async move {
                let _permit = limit
                    .acquire_owned()
                    .await
                    .map_err(|e| std::io::Error::other(e.to_string()))?;
                let spooled = spool.write(&item.bytes).await?;
                Ok::<_, std::io::Error>((item.id, spooled))
            });
        }

        // Wait for every write before deciding: an aborted batch must still
        // drop the files that did get written.
        let mut spooled = Vec::new();
        let mut first_failure = None;
        for result in writes.join_all().await {
            match result {
                Ok(entry) => spooled.push(entry),
                Err(e) if first_failure.is_none() => first_failure = Some(e),
                Err(_) => {}
            }
        }
        if let Some(e) = first_failure {
            return Err(OcrError::BatchWriteFailed(e));
        }
        Ok(spooled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineConfig;
    use std::time::Duration;

    /// Fake engine: a shell loop that answers `<path>|<text>` per argument.
    fn scripted_engine(script: &str) -> Engine {
        Engine::new(EngineConfig {
            program: "sh".into(),
            args: vec!["-c".into(), script.into(), "sh".into()],
            timeout: Duration::from_secs(10),
        })
    }

    fn dispatcher(dir: &Path, script: &str) -> Dispatcher {
        Dispatcher::new(
            TempSpool::new(dir.to_path_buf(), "ocr_".into()),
            scripted_engine(script),
            2,
        )
    }

    fn spool_is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(true)
    }

    #[tokio::test]
    async fn batch_results_correlate_by_identity() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dispatcher = dispatcher(
            dir.path(),
            r#"for f in "$@"; do printf '%s|HELLO\n' "$f"; done"#,
        );

        let items = vec![
            BatchItem {
                id: "box-1".into(),
                bytes: b"first".to_vec(),
            },
            BatchItem {
                id: "box-2".into(),
                bytes: b"second".to_vec(),
            },
        ];
        let mut results = dispatcher.run_batch(items).await.expect("run_batch");
        results.sort_by(|a, b| a.id.cmp(&b.id));

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "box-1");
        assert_eq!(results[0].text, "HELLO");
        assert_eq!(results[1].id, "box-2");
        assert!(spool_is_empty(dir.path()), "temp files must not survive");
    }

    #[tokio::test]
    async fn engine_failure_still_cleans_up() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dispatcher = dispatcher(dir.path(), "exit 3");

        let items = vec![
            BatchItem {
                id: "box-1".into(),
                bytes: b"first".to_vec(),
            },
            BatchItem {
                id: "box-2".into(),
                bytes: b"second".to_vec(),
            },
        ];
        let err = dispatcher.run_batch(items).await.expect_err("should fail");
        assert!(matches!(err, OcrError::EngineFailed(_)));
        assert!(spool_is_empty(dir.path()), "temp files must not survive");
    }

    #[tokio::test]
    async fn partial_engine_output_returns_partial_results() {
        let dir = tempfile::tempdir().expect("tempdir");
        // Answers only the first path.
        let dispatcher = dispatcher(dir.path(), r#"printf '%s|ONLY\n' "$1""#);

        let items = vec![
            BatchItem {
                id: "box-1".into(),
                bytes: b"first".to_vec(),
            },
            BatchItem {
                id: "box-2".into(),
                bytes: b"second".to_vec(),
            },
        ];
        let results = dispatcher.run_batch(items).await.expect("run_batch");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "ONLY");
        assert!(spool_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn write_failure_skips_the_engine() {
        let dir = tempfile::tempdir().expect("tempdir");
        // A regular file where the spool root's parent should be, so every
        // write fails before the engine can be reached.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").expect("blocker");
        let sentinel = dir.path().join("engine_ran");

        let dispatcher = Dispatcher::new(
            TempSpool::new(blocker.join("spool"), "ocr_".into()),
            scripted_engine(&format!(": > '{}'", sentinel.display())),
            2,
        );

        let items = vec![
            BatchItem {
                id: "box-1".into(),
                bytes: b"first".to_vec(),
            },
            BatchItem {
                id: "box-2".into(),
                bytes: b"second".to_vec(),
            },
        ];
        let err = dispatcher.run_batch(items).await.expect_err("should fail");
        assert!(matches!(err, OcrError::BatchWriteFailed(_)));
        assert!(!sentinel.exists(), "engine must not run for a failed batch");

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .expect("read_dir")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("blocker")]);
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dispatcher = dispatcher(dir.path(), "exit 0");
        assert!(matches!(
            dispatcher.run_batch(Vec::new()).await,
            Err(OcrError::EmptyBatch)
        ));
    }

    #[tokio::test]
    async fn run_one_returns_the_single_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dispatcher = dispatcher(
            dir.path(),
            r#"for f in "$@"; do printf '%s|ABC123\n' "$f"; done"#,
        );

        let text = dispatcher
            .run_one("box-1".into(), b"bytes".to_vec())
            .await
            .expect("run_one");
        assert_eq!(text.as_deref(), Some("ABC123"));
        assert!(spool_is_empty(dir.path()));
    }

    #[tokio::test]
    async fn run_one_miss_is_none_not_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dispatcher = dispatcher(dir.path(), "exit 0");

        let text = dispatcher
            .run_one("box-1".into(), b"bytes".to_vec())
            .await
            .expect("run_one");
        assert_eq!(text, None);
        assert!(spool_is_empty(dir.path()));
    }
}
