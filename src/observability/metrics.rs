//! Metrics registry for suggestd
//!
//! - Counters are monotonic and reset only on process start
//! - `generation` mirrors the store's installed generation
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters shared by the HTTP layer and the reload loop.
///
/// All counters use `Relaxed` ordering; readers only need eventually
/// consistent values.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    requests_received: AtomicU64,
    requests_served: AtomicU64,
    requests_rejected: AtomicU64,
    encoding_failures: AtomicU64,
    timeouts: AtomicU64,
    late_results_discarded: AtomicU64,
    reloads_succeeded: AtomicU64,
    reloads_failed: AtomicU64,
    generation: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // Request path

    pub fn increment_requests_received(&self) {
        self.requests_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_requests_served(&self) {
        self.requests_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_requests_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_encoding_failures(&self) {
        self.encoding_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_timeouts(&self) {
        self.timeouts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_late_results_discarded(&self) {
        self.late_results_discarded.fetch_add(1, Ordering::Relaxed);
    }

    // Reload cycle

    pub fn increment_reloads_succeeded(&self) {
        self.reloads_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_reloads_failed(&self) {
        self.reloads_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the generation number just installed
    pub fn set_generation(&self, generation: u64) {
        self.generation.store(generation, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_received: self.requests_received.load(Ordering::Relaxed),
            requests_served: self.requests_served.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            encoding_failures: self.encoding_failures.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            late_results_discarded: self.late_results_discarded.load(Ordering::Relaxed),
            reloads_succeeded: self.reloads_succeeded.load(Ordering::Relaxed),
            reloads_failed: self.reloads_failed.load(Ordering::Relaxed),
            generation: self.generation.load(Ordering::Relaxed),
        }
    }
}

/// Serializable copy of the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub requests_received: u64,
    pub requests_served: u64,
    pub requests_rejected: u64,
    pub encoding_failures: u64,
    pub timeouts: u64,
    pub late_results_discarded: u64,
    pub reloads_succeeded: u64,
    pub reloads_failed: u64,
    pub generation: u64,
}
