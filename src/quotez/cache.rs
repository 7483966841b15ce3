//! Time-bounded memoization.
//!
//! A [`TtlCache`] holds plain values for a fixed lifetime. Nothing expires it
//! implicitly except time; writers that change the underlying data call
//! [`TtlCache::invalidate`] or [`TtlCache::clear`] themselves.

use crate::model::{SavedQuote, SearchQuery, SearchResult};
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Entry<V> {
    value: V,
    stored_at: Instant,
}

#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, Entry<V>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns a copy of the value if it is younger than the ttl.
    /// Expired entries are dropped on the way.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let fresh = self
            .entries
            .get(key)
            .map(|entry| entry.stored_at.elapsed() < self.ttl)?;
        if !fresh {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Stores `value` and drops every entry that has already expired.
    pub fn insert(&mut self, key: K, value: V) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        self.entries.insert(
            key,
            Entry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn invalidate(&mut self, key: &K) {
        self.entries.remove(key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The memoized lookups of one session.
///
/// Remote lookups (author list, searches) share one lifetime; saved-quote
/// reads have their own, shorter one and are dropped on every successful save.
/// Random quotes are never memoized.
#[derive(Debug)]
pub struct Caches {
    pub authors: TtlCache<(), Vec<String>>,
    pub searches: TtlCache<SearchQuery, SearchResult>,
    pub saved: TtlCache<(), Vec<SavedQuote>>,
}

impl Caches {
    pub fn new(remote_ttl: Duration, store_ttl: Duration) -> Self {
        Self {
            authors: TtlCache::new(remote_ttl),
            searches: TtlCache::new(remote_ttl),
            saved: TtlCache::new(store_ttl),
        }
    }

    /// Caches that never hit.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn clear(&mut self) {
        self.authors.clear();
        self.searches.clear();
        self.saved.clear();
    }
}
