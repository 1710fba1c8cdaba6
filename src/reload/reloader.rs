//! Periodic reload loop
//!
//! One cycle: fetch bytes, parse records, build a ranked index, install it.
//! Fetch, parse and build run on tokio's blocking pool; only the install
//! touches the store lock. A failed cycle leaves the installed generation
//! in place and the loop tries again after the next period.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};

use crate::index::{DatasetError, DatasetResult, IndexStore, RankedIndex};
use crate::observability::{Event, Logger, MetricsRegistry};

use super::source::DatasetSource;

/// Outcome of a successful cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadReport {
    /// Generation number installed by this cycle
    pub generation: u64,
    pub keys: usize,
    pub entries: usize,
    /// Size of the raw dataset
    pub bytes: usize,
}

/// Runs reload cycles against a source and a store
#[derive(Clone)]
pub struct Reloader {
    source: Arc<dyn DatasetSource>,
    store: Arc<IndexStore>,
    metrics: Arc<MetricsRegistry>,
}

impl Reloader {
    pub fn new(
        source: Arc<dyn DatasetSource>,
        store: Arc<IndexStore>,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            source,
            store,
            metrics,
        }
    }

    /// Run a single fetch -> parse -> build -> install cycle.
    ///
    /// On error nothing is installed. The error is logged and counted here,
    /// so callers may ignore it.
    pub async fn reload_once(&self) -> DatasetResult<ReloadReport> {
        let description = self.source.describe();
        Logger::trace(Event::ReloadStart, &[("source", &description)]);

        match self.build().await {
            Ok((index, bytes)) => {
                let keys = index.key_count();
                let entries = index.entry_count();
                let generation = self.store.replace(index);

                self.metrics.increment_reloads_succeeded();
                self.metrics.set_generation(generation);
                Logger::info(
                    Event::ReloadInstalled,
                    &[
                        ("entries", &entries.to_string()),
                        ("generation", &generation.to_string()),
                        ("keys", &keys.to_string()),
                        ("source", &description),
                    ],
                );

                Ok(ReloadReport {
                    generation,
                    keys,
                    entries,
                    bytes,
                })
            }
            Err(e) => {
                self.metrics.increment_reloads_failed();
                Logger::warn(
                    Event::ReloadFailed,
                    &[
                        ("error", e.message()),
                        ("phase", e.phase().as_str()),
                        ("serving_generation", &self.store.generation().to_string()),
                        ("source", &description),
                    ],
                );
                Err(e)
            }
        }
    }

    async fn build(&self) -> DatasetResult<(RankedIndex, usize)> {
        let source = Arc::clone(&self.source);
        tokio::task::spawn_blocking(move || {
            let bytes = source.fetch()?;
            let index = RankedIndex::from_json(&bytes)?;
            Ok::<_, DatasetError>((index, bytes.len()))
        })
        .await
        .map_err(|e| DatasetError::build(format!("reload task did not complete: {}", e)))?
    }

    /// Spawn the loop. The first cycle runs immediately; each later cycle
    /// starts one full `period` after the previous one finished.
    pub fn start(self, period: Duration) -> ReloadHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            loop {
                // Failures are already logged; the old generation stays live.
                let _ = self.reload_once().await;

                tokio::select! {
                    _ = tokio::time::sleep(period) => {}
                    _ = shutdown_rx.changed() => break,
                }
            }
            Logger::info(Event::ReloadStopped, &[]);
        });

        ReloadHandle { shutdown_tx, task }
    }
}

/// Lifecycle handle for a running reload loop.
///
/// Dropping the handle also stops the loop at its next sleep.
pub struct ReloadHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ReloadHandle {
    /// Signal the loop to stop and wait for it to exit.
    ///
    /// A cycle already in progress is allowed to finish first.
    pub async fn stop(self) -> Result<(), JoinError> {
        let _ = self.shutdown_tx.send(true);
        self.task.await
    }
}
