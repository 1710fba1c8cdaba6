//! Observability subsystem for suggestd
//!
//! This module provides:
//! - Structured logging (JSON lines)
//! - Lock-free operational counters
//! - Typed lifecycle events
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. A logging failure never fails a request or a reload
//! 3. One log line per event
//!
//! # Usage
//!
//! ```ignore
//! use suggestd::observability::{Event, Logger, MetricsRegistry};
//!
//! Logger::info(Event::ReloadInstalled, &[("generation", "3")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_reloads_succeeded();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
