//! ═══════════════════════════════════════════════════════════════════════════════
//! WEIGHTS — Symmetric Effective-Information Table
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Sparse table keyed by unordered pairs of element ids. Keys are stored as a
//! canonical (low, high) pair so `lookup(a, b)` and `lookup(b, a)` resolve to
//! the same entry. Absent pairs mean "no causal relation modeled" and read as
//! 0.0. The table is immutable once built.
//! ═══════════════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::element::ElementId;

/// Number of additive terms per projection axis
const TERMS_PER_AXIS: f64 = 4.0;

/// Unordered pair of distinct element ids, stored low-first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    low: ElementId,
    high: ElementId,
}

impl PairKey {
    /// Canonicalize a pair. `None` when both ids are equal.
    pub fn new(a: ElementId, b: ElementId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// One literal table entry, as written in complex definitions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub a: ElementId,
    pub b: ElementId,
    pub weight: f64,
}

impl WeightEntry {
    pub fn new(a: u8, b: u8, weight: f64) -> Self {
        Self {
            a: ElementId(a),
            b: ElementId(b),
            weight,
        }
    }
}

/// Immutable symmetric weight table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<WeightEntry>", into = "Vec<WeightEntry>")]
pub struct WeightTable {
    entries: BTreeMap<PairKey, f64>,
}

impl WeightTable {
    /// Build from literal entries.
    ///
    /// Self-pairs are dropped. When the same unordered pair appears twice the
    /// last entry wins.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = WeightEntry>,
    {
        let mut map = BTreeMap::new();
        for entry in entries {
            match PairKey::new(entry.a, entry.b) {
                Some(key) => {
                    map.insert(key, entry.weight);
                }
                None => {
                    tracing::debug!(id = %entry.a, "dropping self-pair weight entry");
                }
            }
        }
        Self { entries: map }
    }

    /// Weight for the unordered pair {a, b}, or 0.0 when absent
    pub fn lookup(&self, a: ElementId, b: ElementId) -> f64 {
        PairKey::new(a, b)
            .and_then(|key| self.entries.get(&key).copied())
            .unwrap_or(0.0)
    }

    /// Shorthand for `lookup` with raw ids
    pub fn w(&self, a: u8, b: u8) -> f64 {
        self.lookup(ElementId(a), ElementId(b))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest stored weight magnitude (0.0 for an empty table)
    pub fn max_abs_weight(&self) -> f64 {
        self.entries.values().fold(0.0_f64, |acc, w| acc.max(w.abs()))
    }

    /// Largest raw magnitude a projection axis can reach with activities in [0, 1]
    pub fn projection_bound(&self) -> f64 {
        TERMS_PER_AXIS * self.max_abs_weight()
    }
}

impl From<Vec<WeightEntry>> for WeightTable {
    fn from(entries: Vec<WeightEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<WeightTable> for Vec<WeightEntry> {
    fn from(table: WeightTable) -> Self {
        table
            .entries
            .into_iter()
            .map(|(key, weight)| WeightEntry {
                a: key.low,
                b: key.high,
                weight,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn divergent() -> WeightTable {
        WeightTable::from_entries([
            WeightEntry::new(1, 2, 2.5),
            WeightEntry::new(1, 3, 2.5),
            WeightEntry::new(1, 4, 2.5),
        ])
    }

    #[test]
    fn test_lookup_present_and_absent() {
        let table = divergent();
        assert_eq!(table.w(1, 2), 2.5);
        assert_eq!(table.w(1, 4), 2.5);
        assert_eq!(table.w(2, 3), 0.0);
        assert_eq!(table.w(3, 4), 0.0);
    }

    #[test]
    fn test_lookup_is_symmetric() {
        let table = WeightTable::from_entries([
            WeightEntry::new(2, 1, 1.0),
            WeightEntry::new(3, 4, -0.75),
        ]);
        for a in 0..=5u8 {
            for b in 0..=5u8 {
                assert_eq!(table.w(a, b), table.w(b, a), "pair ({}, {})", a, b);
            }
        }
        assert_eq!(table.w(1, 2), 1.0);
        assert_eq!(table.w(4, 3), -0.75);
    }

    #[test]
    fn test_self_pair_reads_zero_and_is_dropped() {
        let table = WeightTable::from_entries([WeightEntry::new(2, 2, 9.0)]);
        assert!(table.is_empty());
        assert_eq!(table.w(2, 2), 0.0);
    }

    #[test]
    fn test_duplicate_pair_last_wins() {
        let table = WeightTable::from_entries([
            WeightEntry::new(1, 2, 1.0),
            WeightEntry::new(2, 1, 3.0),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.w(1, 2), 3.0);
    }

    #[test]
    fn test_projection_bound() {
        assert_eq!(divergent().projection_bound(), 10.0);
        assert_eq!(WeightTable::default().projection_bound(), 0.0);

        let negative = WeightTable::from_entries([WeightEntry::new(1, 2, -3.0)]);
        assert_eq!(negative.max_abs_weight(), 3.0);
    }

    #[test]
    fn test_serde_as_entry_list() {
        let table = WeightTable::from_entries([WeightEntry::new(3, 1, 2.5)]);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json, serde_json::json!([{ "a": 1, "b": 3, "weight": 2.5 }]));

        let back: WeightTable = serde_json::from_value(json).unwrap();
        assert_eq!(back, table);
    }
}
