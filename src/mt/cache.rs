//! Write-once memo caches for the degradation pipeline
//!
//! Three independent caches back the pipeline: single translations, round
//! trips and full degradation runs. Each is a [`MemoCache`] keyed by a record
//! of the semantic fields, so no delimiter inside a text can make two keys
//! collide.
//!
//! Entries are never evicted or replaced. The first value stored for a key is
//! the one every later lookup sees.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Key for a single translation leg
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationKey {
    pub text: String,
    pub source: String,
    pub target: String,
}

impl TranslationKey {
    pub fn new(text: &str, source: &str, target: &str) -> Self {
        Self {
            text: text.to_string(),
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// Key for an English → language → English round trip
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoundTripKey {
    pub text: String,
    pub language: String,
}

impl RoundTripKey {
    pub fn new(text: &str, language: &str) -> Self {
        Self {
            text: text.to_string(),
            language: language.to_string(),
        }
    }
}

/// Key for a whole degradation run
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DegradationKey {
    pub reference: String,
    pub hops: i64,
    pub seed: String,
    pub example_id: i64,
}

impl DegradationKey {
    pub fn new(reference: &str, hops: i64, seed: &str, example_id: i64) -> Self {
        Self {
            reference: reference.to_string(),
            hops,
            seed: seed.to_string(),
            example_id,
        }
    }
}

/// Hit/miss counters for one cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Unbounded write-once map guarded by a mutex
///
/// The lock is only held for the duration of a lookup or insert, never across
/// an `.await`.
#[derive(Debug)]
pub struct MemoCache<K, V> {
    entries: Mutex<HashMap<K, V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, V>> {
        // A panic while holding the lock cannot leave a half-written entry
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Look up a key, counting the hit or miss
    pub fn get(&self, key: &K) -> Option<V> {
        let found = self.lock().get(key).cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Store `value` unless the key already has one, and return whatever is stored
    pub fn insert_once(&self, key: K, value: V) -> V {
        self.lock().entry(key).or_insert(value).clone()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}
