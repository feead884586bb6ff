// Bounded Transposition Cache
//
// A capacity-limited key -> value map shared by the tree builder (position ->
// arena node) and the evaluator (position -> score). Every operation takes a
// single coarse lock, so concurrent get/put from search threads can race only
// in the "check, compute, insert" sense: two threads may compute the same
// entry and the later put overwrites the earlier one. The map itself is never
// observed in a torn state.
//
// Eviction is FIFO by first insertion. Re-inserting an existing key replaces
// its value without changing its position in the eviction queue.

use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default capacity, a prime just above 100k.
pub const DEFAULT_CAPACITY: usize = 100_003;

struct Inner<K, V> {
    map: HashMap<K, V>,
    order: VecDeque<K>,
}

/// Concurrency-safe bounded cache with FIFO eviction.
pub struct TranspositionCache<K, V> {
    inner: Mutex<Inner<K, V>>,
    capacity: usize,
    /// Statistics: number of successful lookups
    hits: AtomicU64,
    /// Statistics: number of failed lookups
    misses: AtomicU64,
}

impl<K, V> TranspositionCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a cache holding at most `capacity` entries (at least one).
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries kept at any time
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(Inner {
                map: HashMap::with_capacity(capacity.min(100_000)),
                order: VecDeque::with_capacity(capacity.min(100_000)),
            }),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up `key`, recording a hit or miss.
    pub fn get(&self, key: &K) -> Option<V> {
        let found = self.inner.lock().map.get(key).cloned();
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    /// `true` if `key` is cached. Does not touch the statistics.
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.lock().map.contains_key(key)
    }

    /// Insert or replace `key`. A new key evicts the oldest entry first when
    /// the cache is full.
    pub fn put(&self, key: K, value: V) {
        let mut inner = self.inner.lock();

        if let Some(slot) = inner.map.get_mut(&key) {
            *slot = value;
            return;
        }

        while inner.map.len() >= self.capacity {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.map.remove(&oldest);
                }
                None => break,
            }
        }

        inner.order.push_back(key.clone());
        inner.map.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry and reset the statistics.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.map.clear();
        inner.order.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Get hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

impl<K, V> Default for TranspositionCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
