//! Timeout-guarded execution
//!
//! Races a unit of work against a deadline. The deadline only bounds how
//! long the *caller* waits: the work runs as its own task and is never
//! cancelled. Its result travels through a write-once oneshot channel, so
//! a result produced after the caller gave up is dropped instead of being
//! written to a response that has already been sent.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use thiserror::Error;

use crate::observability::{Event, Logger, MetricsRegistry};

/// Why guarded work produced no result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuardError {
    /// The deadline passed first; the work is still running
    #[error("timeout")]
    Timeout(Duration),

    /// The work panicked before producing a result
    #[error("guarded work panicked")]
    Panicked,
}

/// Result type for guarded execution
pub type GuardResult<T> = Result<T, GuardError>;

/// Runs work under a fixed per-call deadline
#[derive(Debug, Clone)]
pub struct TimeoutGuard {
    timeout: Duration,
    metrics: Option<Arc<MetricsRegistry>>,
}

impl TimeoutGuard {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            metrics: None,
        }
    }

    /// Count timeouts and discarded late results in `metrics`
    pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `work`, waiting at most the configured timeout for its result.
    ///
    /// - Work finishes first: its output is returned.
    /// - Deadline passes first: `GuardError::Timeout` is returned right away
    ///   and the work keeps running; its output is discarded when it ends.
    /// - Work panics: `GuardError::Panicked`.
    pub async fn run<F, T>(&self, work: F) -> GuardResult<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let metrics = self.metrics.clone();

        tokio::spawn(async move {
            let output = work.await;
            if tx.send(output).is_err() {
                if let Some(metrics) = metrics {
                    metrics.increment_late_results_discarded();
                }
                Logger::trace(Event::LateResultDiscarded, &[]);
            }
        });

        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(_)) => {
                Logger::error(Event::WorkPanicked, &[]);
                Err(GuardError::Panicked)
            }
            Err(_) => {
                if let Some(metrics) = &self.metrics {
                    metrics.increment_timeouts();
                }
                Err(GuardError::Timeout(self.timeout))
            }
        }
    }
}
