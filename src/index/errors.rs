//! Dataset error types
//!
//! Dataset errors only ever occur during a reload cycle. They are never
//! surfaced to HTTP callers: the reload loop logs them and keeps serving
//! the last installed generation.

use std::fmt;

use thiserror::Error;

/// Phases of one reload cycle.
///
/// A cycle walks `Idle -> Fetching -> Parsing -> Building -> Installed`
/// and returns to `Idle` after the period sleep. Failures in `Fetching` or
/// `Parsing` jump straight back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadPhase {
    /// Waiting for the next cycle
    Idle,
    /// Reading raw bytes from the dataset source
    Fetching,
    /// Decoding bytes into dataset records
    Parsing,
    /// Building the ranked index
    Building,
    /// New generation swapped into the store
    Installed,
}

impl ReloadPhase {
    /// Returns the phase name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ReloadPhase::Idle => "idle",
            ReloadPhase::Fetching => "fetching",
            ReloadPhase::Parsing => "parsing",
            ReloadPhase::Building => "building",
            ReloadPhase::Installed => "installed",
        }
    }
}

impl fmt::Display for ReloadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reload-time failure, tagged with the phase it happened in
#[derive(Debug, Clone, Error)]
#[error("dataset {phase} failed: {message}")]
pub struct DatasetError {
    phase: ReloadPhase,
    message: String,
}

impl DatasetError {
    /// The source could not produce bytes
    pub fn fetch(reason: impl Into<String>) -> Self {
        Self {
            phase: ReloadPhase::Fetching,
            message: reason.into(),
        }
    }

    /// The bytes are not a valid dataset
    pub fn parse(reason: impl Into<String>) -> Self {
        Self {
            phase: ReloadPhase::Parsing,
            message: reason.into(),
        }
    }

    /// Index construction did not complete
    pub fn build(reason: impl Into<String>) -> Self {
        Self {
            phase: ReloadPhase::Building,
            message: reason.into(),
        }
    }

    /// Phase the cycle was in when it failed
    pub fn phase(&self) -> ReloadPhase {
        self.phase
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
