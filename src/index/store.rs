//! Index store
//!
//! Owns the currently served generation of the ranked index.
//!
//! # Concurrency
//!
//! A single `RwLock` guards an `Arc<Generation>`. The lock is held only to
//! clone or swap that pointer, never while building an index or encoding
//! a response. Readers that cloned the old pointer finish against the old
//! generation; it is dropped once the last of them is done.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};

use super::ranked::{Entry, RankedIndex};

/// One installed build of the index
#[derive(Debug)]
pub struct Generation {
    number: u64,
    index: RankedIndex,
    loaded_at: DateTime<Utc>,
}

impl Generation {
    /// Monotonic generation number; 0 is the initial empty index
    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn index(&self) -> &RankedIndex {
        &self.index
    }

    /// When this generation was installed
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Holder of the current generation
#[derive(Debug)]
pub struct IndexStore {
    current: RwLock<Arc<Generation>>,
}

impl IndexStore {
    /// Create a store serving an empty index at generation 0
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(Generation {
                number: 0,
                index: RankedIndex::empty(),
                loaded_at: Utc::now(),
            })),
        }
    }

    /// Install `index` as the served generation and return its number.
    pub fn replace(&self, index: RankedIndex) -> u64 {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let number = current.number + 1;
        *current = Arc::new(Generation {
            number,
            index,
            loaded_at: Utc::now(),
        });
        number
    }

    /// The served generation
    pub fn current(&self) -> Arc<Generation> {
        // The guarded value is a single pointer, so a poisoned lock still
        // holds a complete generation.
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Ranked entries for `key`; empty when the key is unknown.
    pub fn lookup(&self, key: &str) -> Arc<[Entry]> {
        let generation = self.current();
        generation
            .index
            .get(key)
            .cloned()
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }

    pub fn generation(&self) -> u64 {
        self.current().number
    }
}

impl Default for IndexStore {
    fn default() -> Self {
        Self::new()
    }
}
