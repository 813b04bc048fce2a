//! The follow loop.

use std::path::PathBuf;
use std::time::Duration;

use tokio::fs::File;
use tokio::time::sleep;

use crate::alerting::AlertDispatcher;
use crate::config::WatcherConfig;
use crate::detection::Pipeline;
use crate::tail::reader::LineReader;
use crate::tail::TailError;

/// Follows one access log, feeding every complete line through the pipeline
/// and dispatching whatever alerts come out.
pub struct LogTailer {
    path: PathBuf,
    poll_interval: Duration,
    pipeline: Pipeline,
    dispatcher: AlertDispatcher,
}

impl LogTailer {
    pub fn new(
        path: impl Into<PathBuf>,
        poll_interval: Duration,
        pipeline: Pipeline,
        dispatcher: AlertDispatcher,
    ) -> Self {
        Self {
            path: path.into(),
            poll_interval,
            pipeline,
            dispatcher,
        }
    }

    pub fn from_config(config: &WatcherConfig, dispatcher: AlertDispatcher) -> Self {
        Self::new(
            &config.source.path,
            Duration::from_millis(config.source.poll_interval_ms),
            Pipeline::new(&config.detection),
            dispatcher,
        )
    }

    /// Open the log, replay what is already there, then follow it forever.
    ///
    /// Returns only on an I/O error: a missing file at startup
    /// (`TailError::Open`) or a failed read later on (`TailError::Read`).
    pub async fn run(mut self) -> Result<(), TailError> {
        let file = File::open(&self.path).await.map_err(|source| TailError::Open {
            path: self.path.clone(),
            source,
        })?;
        let mut reader = LineReader::new(file);

        tracing::info!(path = %self.path.display(), "Watching access log");

        let existing = self.drain(&mut reader).await?;
        tracing::info!(
            lines = existing,
            baseline_pool = self.pipeline.failover().last_pool().unwrap_or("none"),
            window_filled = self.pipeline.error_rate().len(),
            "Processed existing lines"
        );

        loop {
            if self.drain(&mut reader).await? == 0 {
                sleep(self.poll_interval).await;
            }
        }
    }

    /// Process every complete line currently available; returns how many.
    async fn drain(&mut self, reader: &mut LineReader) -> Result<u64, TailError> {
        let mut processed = 0;
        while let Some(line) = reader.next_line().await.map_err(|source| TailError::Read {
            path: self.path.clone(),
            source,
        })? {
            for alert in self.pipeline.ingest(&line) {
                self.dispatcher.dispatch(alert).await;
            }
            processed += 1;
        }
        Ok(processed)
    }
}
