//! Keyed cache of remote query results.
//!
//! Entries stay readable after they go stale so consumers keep rendering the
//! last known value while a refetch is in flight. An entry is stale once it
//! has been invalidated or, when a staleness window is configured, once it
//! is older than that window.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

struct CacheEntry<V> {
    value: V,
    fetched_at: Instant,
    invalidated: bool,
}

pub struct QueryCache<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    stale_after: Option<Duration>,
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Creates a cache. `None` keeps entries fresh until invalidated.
    pub fn new(stale_after: Option<Duration>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stale_after,
        }
    }

    /// Last fetched value, fresh or stale.
    pub fn get(&self, key: &K) -> Option<V> {
        self.read(key, V::clone)
    }

    /// Runs `f` against the cached value without cloning it.
    pub fn read<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).map(|entry| f(&entry.value))
    }

    /// True if an entry exists, was not invalidated and is within the window.
    pub fn is_fresh(&self, key: &K) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        match entries.get(key) {
            Some(entry) => !entry.invalidated && !self.expired(entry),
            None => false,
        }
    }

    /// Stores a freshly fetched value.
    pub fn insert(&self, key: K, value: V) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                key,
                CacheEntry {
                    value,
                    fetched_at: Instant::now(),
                    invalidated: false,
                },
            );
    }

    /// Marks an entry stale so the next read refetches. Returns whether it existed.
    pub fn invalidate(&self, key: &K) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match entries.get_mut(key) {
            Some(entry) => {
                entry.invalidated = true;
                true
            }
            None => false,
        }
    }

    fn expired(&self, entry: &CacheEntry<V>) -> bool {
        self.stale_after
            .map(|window| entry.fetched_at.elapsed() >= window)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_entry_is_not_fresh() {
        let cache: QueryCache<&str, u32> = QueryCache::new(None);
        assert!(!cache.is_fresh(&"a"));
        assert_eq!(cache.get(&"a"), None);
    }

    #[test]
    fn inserted_entry_is_fresh_until_invalidated() {
        let cache = QueryCache::new(None);
        cache.insert("a", 1);
        assert!(cache.is_fresh(&"a"));

        assert!(cache.invalidate(&"a"));
        assert!(!cache.is_fresh(&"a"));
        assert_eq!(cache.get(&"a"), Some(1));
    }

    #[test]
    fn reinsert_clears_invalidation() {
        let cache = QueryCache::new(None);
        cache.insert("a", 1);
        cache.invalidate(&"a");
        cache.insert("a", 2);

        assert!(cache.is_fresh(&"a"));
        assert_eq!(cache.read(&"a", |v| v * 10), Some(20));
    }

    #[test]
    fn invalidate_missing_key_reports_false() {
        let cache: QueryCache<&str, u32> = QueryCache::new(None);
        assert!(!cache.invalidate(&"a"));
    }

    #[test]
    fn zero_window_makes_entries_stale_immediately() {
        let cache = QueryCache::new(Some(Duration::ZERO));
        cache.insert("a", 1);
        assert!(!cache.is_fresh(&"a"));
    }

    #[test]
    fn entries_are_scoped_by_key() {
        let cache = QueryCache::new(None);
        cache.insert("alice", 1);
        cache.insert("bob", 2);
        cache.invalidate(&"alice");

        assert!(!cache.is_fresh(&"alice"));
        assert!(cache.is_fresh(&"bob"));
        assert_eq!(cache.get(&"bob"), Some(2));
    }
}
