//! Grouping and bucketing utilities.
//!
//! Analytics tie-break rules depend on first-encounter ordering, so the
//! maps returned here are `IndexMap`s rather than `HashMap`s.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::hash::Hash;

/// Groups items by key, preserving the order keys were first seen in.
pub fn group_by<I, K, F>(items: I, mut key: F) -> IndexMap<K, Vec<I::Item>>
where
    I: IntoIterator,
    K: Hash + Eq,
    F: FnMut(&I::Item) -> K,
{
    let mut groups: IndexMap<K, Vec<I::Item>> = IndexMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}

/// Frequency table with first-encounter key ordering.
pub fn count_by<I, K, F>(items: I, mut key: F) -> IndexMap<K, u64>
where
    I: IntoIterator,
    K: Hash + Eq,
    F: FnMut(&I::Item) -> K,
{
    let mut counts: IndexMap<K, u64> = IndexMap::new();
    for item in items {
        *counts.entry(key(&item)).or_default() += 1;
    }
    counts
}

/// Key with the highest count; ties resolve to the earliest-inserted key.
pub fn max_by_count<K: Clone + Hash + Eq>(counts: &IndexMap<K, u64>) -> Option<K> {
    let mut best: Option<(&K, u64)> = None;
    for (key, count) in counts {
        if best.map_or(true, |(_, best_count)| *count > best_count) {
            best = Some((key, *count));
        }
    }
    best.map(|(key, _)| key.clone())
}

/// Calendar-day bucket key (`YYYY-MM-DD`). No timezone conversion is
/// applied; the bucket follows the source timestamp as stored.
pub fn day_key(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}
