//! Single-slot memoization keyed by declared dependency keys.
//!
//! Each recomputation tier (grouping, flattening, viewport range) owns one
//! [`Memo`]. The key is a plain value built from the tier's inputs, usually
//! [`Stamp`]s plus geometry, so a tier reruns only when one of its inputs has
//! actually been replaced.

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique version tag for a mutable input.
pub type Stamp = u64;

static NEXT_STAMP: AtomicU64 = AtomicU64::new(1);

/// Hand out a stamp no other input has used.
pub fn next_stamp() -> Stamp {
    NEXT_STAMP.fetch_add(1, Ordering::Relaxed)
}

/// A cache holding the value computed for the most recent key.
///
/// A lookup with a different key discards the old value; there is never more
/// than one entry.
#[derive(Debug)]
pub struct Memo<K, V> {
    key: Option<K>,
    value: Option<V>,
    hits: u64,
    misses: u64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            key: None,
            value: None,
            hits: 0,
            misses: 0,
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, computing it first if the key changed.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        if self.key.as_ref() != Some(&key) {
            self.value = None;
            self.key = Some(key);
        }
        if self.value.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        self.value.get_or_insert_with(compute)
    }

    /// Cached value, only if it was computed for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        if self.key.as_ref() == Some(key) {
            self.value.as_ref()
        } else {
            None
        }
    }

    /// Whether a value computed for `key` is present.
    pub fn is_fresh(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Drop the cached value; the next lookup recomputes.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.value = None;
    }

    /// Lookups served from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that ran the computation.
    pub fn misses(&self) -> u64 {
        self.misses
    }
}
