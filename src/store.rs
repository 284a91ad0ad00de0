//! Concurrent keyed record store
//!
//! Both the game registry and the bet ledger keep their records in a
//! `KeyedStore`. Reads are lock-free across shards; `update` holds the key's
//! shard write guard for the duration of the closure, which serializes
//! concurrent transitions on the same record.

use dashmap::DashMap;
use std::{
    hash::Hash,
    sync::atomic::{AtomicU64, Ordering},
};

struct Slot<V> {
    seq: u64,
    record: V,
}

/// Keyed map that remembers insertion order for listings
pub struct KeyedStore<K, V> {
    entries: DashMap<K, Slot<V>>,
    next_seq: AtomicU64,
}

impl<K, V> KeyedStore<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Insert a new record. Replaces any record already stored under `key`.
    pub fn insert(&self, key: K, record: V) {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.entries.insert(key, Slot { seq, record });
    }

    /// Snapshot of the record stored under `key`
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).map(|slot| slot.record.clone())
    }

    /// Run `f` against the record under `key` while holding its write guard.
    ///
    /// Returns `None` if the key is unknown.
    pub fn update<R>(&self, key: &K, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        self.entries.get_mut(key).map(|mut slot| f(&mut slot.record))
    }

    /// All records matching `predicate`, in insertion order
    pub fn filter(&self, predicate: impl Fn(&V) -> bool) -> Vec<V> {
        let mut matches: Vec<(u64, V)> = self
            .entries
            .iter()
            .filter(|slot| predicate(&slot.record))
            .map(|slot| (slot.seq, slot.record.clone()))
            .collect();
        matches.sort_by_key(|(seq, _)| *seq);
        matches.into_iter().map(|(_, record)| record).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Default for KeyedStore<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_keeps_insertion_order() {
        let store = KeyedStore::new();
        for (key, value) in [("c", 3), ("a", 1), ("b", 2), ("d", 4)] {
            store.insert(key.to_string(), value);
        }

        assert_eq!(store.filter(|_| true), vec![3, 1, 2, 4]);
        assert_eq!(store.filter(|v| v % 2 == 0), vec![2, 4]);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_update_and_get() {
        let store = KeyedStore::new();
        store.insert("k".to_string(), 10);

        let doubled = store.update(&"k".to_string(), |v| {
            *v *= 2;
            *v
        });

        assert_eq!(doubled, Some(20));
        assert_eq!(store.get(&"k".to_string()), Some(20));
        assert_eq!(store.update(&"missing".to_string(), |v| *v), None);
        assert!(store.get(&"missing".to_string()).is_none());
    }
}
