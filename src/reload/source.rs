//! Dataset sources
//!
//! A source turns a configured location into raw bytes on demand. It knows
//! nothing about the dataset format.

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use crate::index::{DatasetError, DatasetResult};

/// Produces the raw dataset bytes for one reload cycle
pub trait DatasetSource: Send + Sync {
    /// Read the full dataset. Called from a blocking thread.
    fn fetch(&self) -> DatasetResult<Vec<u8>>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

/// Dataset stored in a file on local disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for FileSource {
    fn fetch(&self) -> DatasetResult<Vec<u8>> {
        fs::read(&self.path).map_err(|e| {
            DatasetError::fetch(format!("failed to read {}: {}", self.path.display(), e))
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory dataset whose contents can be swapped between cycles.
///
/// An unset source fails every fetch.
#[derive(Debug, Default)]
pub struct StaticSource {
    bytes: Mutex<Option<Vec<u8>>>,
}

impl StaticSource {
    /// Source that serves `bytes`
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Mutex::new(Some(bytes.into())),
        }
    }

    /// Source with nothing to serve
    pub fn unset() -> Self {
        Self::default()
    }

    /// Replace the bytes served by subsequent fetches
    pub fn set(&self, bytes: impl Into<Vec<u8>>) {
        *self.bytes.lock().unwrap_or_else(PoisonError::into_inner) = Some(bytes.into());
    }

    /// Make subsequent fetches fail
    pub fn clear(&self) {
        *self.bytes.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl DatasetSource for StaticSource {
    fn fetch(&self) -> DatasetResult<Vec<u8>> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| DatasetError::fetch("static source has no dataset"))
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}
