//! Dataset reload subsystem
//!
//! A background task that periodically refreshes the index store from a
//! dataset source.
//!
//! # Invariants
//!
//! - The first cycle runs at start, not after the first period
//! - Cycles never overlap; the next one is scheduled only after a full sleep
//! - A failed cycle never changes the served generation

mod reloader;
mod source;

pub use reloader::{ReloadHandle, ReloadReport, Reloader};
pub use source::{DatasetSource, FileSource, StaticSource};
