//! Bounded cache for palettes and resolved colors.
//!
//! Oldest-inserted entries are evicted first once the cache is full. Reads do
//! not refresh an entry's position; re-inserting a key does. Entries can be
//! dropped in bulk by key prefix so that everything derived from one image
//! goes away together.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

struct Entry<V> {
    value: V,
    inserted_at: DateTime<Utc>,
}

struct Inner<V> {
    entries: HashMap<String, Entry<V>>,
    /// Keys by insertion time (oldest first)
    insertion_order: VecDeque<String>,
}

/// Thread-safe cache holding at most `capacity` entries.
pub struct BoundedCache<V> {
    name: &'static str,
    capacity: usize,
    inner: Mutex<Inner<V>>,
}

impl<V: Clone> BoundedCache<V> {
    /// Create a cache; a capacity of zero is treated as one.
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            capacity: capacity.max(1),
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                insertion_order: VecDeque::new(),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached value for `key`.
    pub fn get(&self, key: &str) -> Option<V> {
        self.lock().entries.get(key).map(|e| e.value.clone())
    }

    /// When `key` was last stored.
    pub fn inserted_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.lock().entries.get(key).map(|e| e.inserted_at)
    }

    /// Store a value, evicting the oldest entries to stay within capacity.
    pub fn put(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let mut inner = self.lock();

        if inner.entries.remove(&key).is_some() {
            inner.insertion_order.retain(|k| k != &key);
        }

        while inner.entries.len() >= self.capacity {
            let Some(oldest_key) = inner.insertion_order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest_key);
            tracing::debug!(
                cache = self.name,
                key = %oldest_key,
                cache_size = inner.entries.len(),
                "Evicted oldest entry"
            );
        }

        inner.entries.insert(
            key.clone(),
            Entry {
                value,
                inserted_at: Utc::now(),
            },
        );
        inner.insertion_order.push_back(key);
    }

    /// Remove every entry whose key starts with `prefix`; returns how many.
    ///
    /// An empty prefix clears the cache.
    pub fn invalidate_prefix(&self, prefix: &str) -> usize {
        let mut inner = self.lock();
        let before = inner.entries.len();
        inner.entries.retain(|k, _| !k.starts_with(prefix));
        inner.insertion_order.retain(|k| !k.starts_with(prefix));
        let removed = before - inner.entries.len();
        if removed > 0 {
            tracing::debug!(cache = self.name, prefix, removed, "Invalidated entries");
        }
        removed
    }

    /// Remove everything.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.insertion_order.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
