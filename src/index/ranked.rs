//! Ranked index
//!
//! Maps a key to its candidate entries ordered by ascending cost. An index
//! is built once from a full dataset snapshot and never mutated afterwards;
//! every reload produces a new instance.
//!
//! # Ordering
//!
//! - Lower cost sorts first
//! - Equal costs keep dataset order (stable)

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::errors::{DatasetError, DatasetResult};

/// One candidate suggestion for a key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub cost: i64,
    pub name: String,
}

/// Dataset input record. `id` is the lookup key and may repeat.
///
/// Missing fields take their zero value, so one incomplete record does not
/// reject the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub cost: i64,
    #[serde(default)]
    pub name: String,
}

/// Immutable key -> ranked entries mapping
#[derive(Debug, Default)]
pub struct RankedIndex {
    entries: HashMap<String, Arc<[Entry]>>,
    entry_count: usize,
}

impl RankedIndex {
    /// An index with no keys
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an index from records in dataset order.
    ///
    /// Each record is appended to its key's list and then shifted left
    /// while its cost is strictly lower than its neighbour's. Per-key lists
    /// are short, so the localized insertion step beats a full sort.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = DatasetRecord>,
    {
        let mut grouped: HashMap<String, Vec<Entry>> = HashMap::new();
        let mut entry_count = 0;

        for record in records {
            let list = grouped.entry(record.id).or_default();
            list.push(Entry {
                cost: record.cost,
                name: record.name,
            });
            entry_count += 1;

            let mut i = list.len() - 1;
            while i > 0 && list[i].cost < list[i - 1].cost {
                list.swap(i, i - 1);
                i -= 1;
            }
        }

        let entries = grouped
            .into_iter()
            .map(|(key, list)| (key, Arc::from(list)))
            .collect();

        Self {
            entries,
            entry_count,
        }
    }

    /// Parse a JSON array of records and build an index from it.
    ///
    /// `[]` yields an empty index. Anything that is not a JSON array of
    /// record objects, including zero-length input and a bare `null`, is a
    /// parse error.
    pub fn from_json(bytes: &[u8]) -> DatasetResult<Self> {
        let records: Vec<DatasetRecord> =
            serde_json::from_slice(bytes).map_err(|e| DatasetError::parse(e.to_string()))?;
        Ok(Self::build(records))
    }

    /// Ranked entries for `key`, if present
    pub fn get(&self, key: &str) -> Option<&Arc<[Entry]>> {
        self.entries.get(key)
    }

    /// Number of distinct keys
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of entries across all keys
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, cost: i64, name: &str) -> DatasetRecord {
        DatasetRecord {
            id: id.to_string(),
            cost,
            name: name.to_string(),
        }
    }

    fn names(index: &RankedIndex, key: &str) -> Vec<String> {
        index
            .get(key)
            .map(|list| list.iter().map(|e| e.name.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_build_sorts_by_cost() {
        let index = RankedIndex::build(vec![
            record("a", 5, "apple"),
            record("a", 2, "avocado"),
            record("a", 9, "apricot"),
            record("a", 1, "acai"),
        ]);

        assert_eq!(names(&index, "a"), vec!["acai", "avocado", "apple", "apricot"]);
    }

    #[test]
    fn test_equal_costs_keep_input_order() {
        let index = RankedIndex::build(vec![
            record("k", 3, "first"),
            record("k", 1, "low"),
            record("k", 3, "second"),
            record("k", 3, "third"),
        ]);

        assert_eq!(names(&index, "k"), vec!["low", "first", "second", "third"]);
    }

    #[test]
    fn test_keys_are_independent() {
        let index = RankedIndex::build(vec![
            record("a", 2, "a2"),
            record("b", 1, "b1"),
            record("a", 1, "a1"),
        ]);

        assert_eq!(index.key_count(), 2);
        assert_eq!(index.entry_count(), 3);
        assert_eq!(names(&index, "a"), vec!["a1", "a2"]);
        assert_eq!(names(&index, "b"), vec!["b1"]);
    }

    #[test]
    fn test_empty_dataset() {
        let index = RankedIndex::from_json(b"[]").unwrap();
        assert!(index.is_empty());
        assert_eq!(index.entry_count(), 0);
    }

    #[test]
    fn test_zero_length_input_is_parse_error() {
        let err = RankedIndex::from_json(b"").unwrap_err();
        assert_eq!(err.phase(), crate::index::ReloadPhase::Parsing);
    }

    #[test]
    fn test_malformed_records_rejected() {
        assert!(RankedIndex::from_json(br#"{"id":"a"}"#).is_err());
        assert!(RankedIndex::from_json(br#"[{"id":"a","cost":"high","name":"x"}]"#).is_err());
        assert!(RankedIndex::from_json(b"null").is_err());
    }

    #[test]
    fn test_missing_fields_default_to_zero_values() {
        let index = RankedIndex::from_json(
            br#"[{"id":"a","cost":1},{"id":"a","cost":0,"name":"zero"},{"name":"no-id"},{"id":"c"}]"#,
        )
        .unwrap();

        assert_eq!(index.entry_count(), 4);
        assert_eq!(names(&index, "a"), vec!["zero", ""]);
        assert_eq!(names(&index, ""), vec!["no-id"]);
        assert_eq!(index.get("c").unwrap()[0].cost, 0);
    }

    #[test]
    fn test_negative_costs_sort_first() {
        let index = RankedIndex::from_json(
            br#"[{"id":"n","cost":0,"name":"zero"},{"id":"n","cost":-4,"name":"minus"}]"#,
        )
        .unwrap();

        assert_eq!(names(&index, "n"), vec!["minus", "zero"]);
    }
}
