//! Ranked suggestion index for suggestd
//!
//! The index is derived, in-memory-only state rebuilt wholesale from the
//! dataset on every reload.
//!
//! # Invariants
//!
//! - Every key's entries are sorted by cost ascending, ties in dataset order
//! - A built index is never mutated; reloads install a new generation
//! - Readers always observe a complete generation, old or new
//! - Unknown keys look up as an empty list, never an error

mod errors;
mod ranked;
mod store;

pub use errors::{DatasetError, DatasetResult, ReloadPhase};
pub use ranked::{DatasetRecord, Entry, RankedIndex};
pub use store::{Generation, IndexStore};
