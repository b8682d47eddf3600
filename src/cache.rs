//! Thread-Safe Bounded LRU Cache
//!
//! [`LruCache`] is the public face of the crate: a [`Store`] behind a single
//! `parking_lot::Mutex`. Every operation, including the `count`/`size`
//! readers, takes the lock for its whole duration, so all state transitions
//! are linearizable in lock-acquisition order.
//!
//! ## Why one Mutex?
//!
//! `get` moves the entry to the front of the recency list, so even reads
//! mutate. An `RwLock` would hand out write locks for nearly every call and
//! only add bookkeeping. Striping the key space across segments would break
//! the global LRU order and let the per-segment limits drift from the
//! configured ones, so the whole store sits behind one lock.
//!
//! # Payload ownership
//!
//! `set` takes the payload by value; nothing is copied on the way in.
//! `get` returns a clone, because the guard cannot outlive the call. Store
//! `Arc<[u8]>` (or `bytes::Bytes` with the `bytes` feature) when clones must
//! be cheap, or use [`LruCache::get_with`] to borrow the payload under the
//! lock.
//!
//! # Example
//!
//! ```
//! use bounded_cache::LruCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache: Arc<LruCache<Vec<u8>>> = Arc::new(LruCache::with_limits(1024, 100));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..50 {
//!                 cache.set(format!("key-{}-{}", t, i), vec![0u8; 8]);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! assert!(cache.count() <= 100);
//! assert!(cache.size() <= 1024);
//! ```

use crate::config::CacheConfig;
use crate::entry::ByteSize;
use crate::error::InvariantViolation;
use crate::index::DefaultHashBuilder;
use crate::metrics::CacheMetrics;
use crate::policy::{Limits, Usage};
use crate::store::Store;
use parking_lot::Mutex;
use std::fmt;
use std::hash::BuildHasher;

/// A thread-safe LRU cache bounded by entry count and aggregate payload size.
///
/// # Type Parameters
///
/// - `V`: Payload type. Must implement [`ByteSize`] and `Clone`. Defaults to
///   `Vec<u8>`.
/// - `S`: Hash builder for the key index. Defaults to `DefaultHashBuilder`.
///
/// # Examples
///
/// ```
/// use bounded_cache::LruCache;
///
/// let cache: LruCache<&'static str> = LruCache::with_limits(0, 3);
/// cache.set("k0", "c0");
/// cache.set("k1", "c1");
/// cache.set("k2", "c2");
///
/// // k0 becomes the most recently used entry
/// assert_eq!(cache.get("k0"), Some("c0"));
///
/// // k1 is now the least recently used and makes room for k3
/// cache.set("k3", "c3");
/// assert!(!cache.has("k1"));
/// assert!(cache.has("k0"));
/// ```
pub struct LruCache<V = Vec<u8>, S = DefaultHashBuilder> {
    store: Mutex<Store<V, S>>,
}

impl<V> LruCache<V, DefaultHashBuilder> {
    /// Creates an unbounded cache. Both limits are `0`.
    pub fn new() -> Self {
        Self::init(CacheConfig::default(), None)
    }

    /// Creates a cache with the given size and count limits (`0` = unbounded).
    pub fn with_limits(size_limit: u64, count_limit: usize) -> Self {
        Self::init(CacheConfig::with_limits(size_limit, count_limit), None)
    }

    /// Creates a cache from a configuration with an optional hasher.
    ///
    /// # Arguments
    ///
    /// * `config` - Limits and pre-allocation hint
    /// * `hasher` - Optional hash builder. If `None`, uses `DefaultHashBuilder`
    ///
    /// # Example
    ///
    /// ```
    /// use bounded_cache::config::CacheConfig;
    /// use bounded_cache::LruCache;
    ///
    /// let cache: LruCache<String> = LruCache::init(CacheConfig::with_limits(40, 4), None);
    /// assert!(cache.is_empty());
    /// ```
    pub fn init(config: CacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::with_hasher(config, hasher.unwrap_or_default())
    }
}

impl<V, S: BuildHasher> LruCache<V, S> {
    /// Creates a cache with a custom hash builder.
    ///
    /// Use this for deterministic hashing or DoS-resistant hashers.
    pub fn with_hasher(config: CacheConfig, hash_builder: S) -> Self {
        tracing::debug!("[lru]: new cache with {:?}", config);
        LruCache {
            store: Mutex::new(Store::with_hasher(config, hash_builder)),
        }
    }

    /// Replaces the capacity limits (`0` = unbounded on that dimension).
    ///
    /// Takes effect immediately: if the cache is over either new limit, least
    /// recently used entries are evicted until both hold.
    pub fn set_limits(&self, size_limit: u64, count_limit: usize) {
        self.store
            .lock()
            .set_limits(Limits::new(size_limit, count_limit));
    }

    /// Returns the current capacity limits.
    pub fn limits(&self) -> Limits {
        self.store.lock().limits()
    }

    /// Returns true if `key` is present.
    ///
    /// Unlike [`get`](Self::get) this does not change the recency order and
    /// is not recorded as a hit or miss.
    pub fn has(&self, key: &str) -> bool {
        self.store.lock().has(key)
    }

    /// Applies `f` to the payload of `key` while holding the lock.
    ///
    /// Marks the entry most recently used, exactly like [`get`](Self::get),
    /// but avoids cloning the payload.
    ///
    /// # Example
    ///
    /// ```
    /// use bounded_cache::LruCache;
    ///
    /// let cache: LruCache<Vec<u8>> = LruCache::new();
    /// cache.set("blob", vec![7u8; 4096]);
    /// assert_eq!(cache.get_with("blob", |v| v.len()), Some(4096));
    /// ```
    pub fn get_with<F, R>(&self, key: &str, f: F) -> Option<R>
    where
        F: FnOnce(&V) -> R,
    {
        self.store.lock().get(key).map(f)
    }

    /// Removes `key`. Returns true iff it was present.
    pub fn remove(&self, key: &str) -> bool {
        self.store.lock().remove(key).is_some()
    }

    /// Number of entries.
    pub fn count(&self) -> usize {
        self.store.lock().count()
    }

    /// Sum of payload sizes in bytes.
    pub fn size(&self) -> u64 {
        self.store.lock().size()
    }

    /// Count and size read under a single lock acquisition.
    pub fn usage(&self) -> Usage {
        self.store.lock().usage()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    /// Removes every entry. Limits and metrics are kept.
    pub fn clear(&self) {
        self.store.lock().clear();
    }

    /// Keys ordered from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        self.store.lock().keys().map(str::to_owned).collect()
    }

    /// Snapshot of the operation counters.
    pub fn metrics(&self) -> CacheMetrics {
        self.store.lock().metrics().clone()
    }

    /// Audits the internal structures against each other and the limits.
    ///
    /// O(n). An error here is always a bug in this crate.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.store.lock().check_invariants()
    }
}

impl<V: ByteSize + Clone, S: BuildHasher> LruCache<V, S> {
    /// Stores `value` under `key` and makes it the most recently used entry.
    ///
    /// Evicts least recently used entries as needed to honour both limits.
    /// Returns `false` without changing anything, including an existing
    /// entry for `key`, when the payload alone is larger than the size limit.
    ///
    /// # Example
    ///
    /// ```
    /// use bounded_cache::LruCache;
    ///
    /// let cache: LruCache<&'static str> = LruCache::with_limits(5, 0);
    /// assert!(cache.set("k", "12345"));
    /// assert!(!cache.set("k", "1234567890"));
    /// assert_eq!(cache.get("k"), Some("12345"));
    /// ```
    pub fn set(&self, key: impl Into<String>, value: V) -> bool {
        self.store.lock().set(key.into(), value)
    }

    /// Returns a clone of the payload for `key` and makes it the most
    /// recently used entry.
    pub fn get(&self, key: &str) -> Option<V> {
        self.store.lock().get(key).cloned()
    }
}

impl<V> Default for LruCache<V, DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S> fmt::Debug for LruCache<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("store", &*self.store.lock())
            .finish()
    }
}
