//! Cache Configuration
//!
//! Configuration structs have all public fields for simple instantiation:
//!
//! - **Simple**: Just create the struct with all fields set, or start from
//!   `Default` and override what you need
//! - **Serializable**: With the `serde` feature the config can be embedded in
//!   an application config file; missing fields take their defaults
//!
//! # Sizing Guidelines
//!
//! ## Understanding `size_limit` and `count_limit`
//!
//! - **`size_limit`**: Maximum total size in bytes of cached *payloads*. Keys and
//!   bookkeeping are not charged.
//! - **`count_limit`**: Maximum number of entries. Each entry carries roughly
//!   80-100 bytes of overhead beyond its payload (key string, list node, index
//!   slot).
//!
//! Either limit may be `0`, which disables that dimension. With both at `0`
//! the cache only shrinks through explicit removal.
//!
//! ```text
//! Total Memory ≈ size_limit + count × (overhead_per_entry + key length)
//! ```
//!
//! # Examples
//!
//! ```
//! use bounded_cache::config::CacheConfig;
//! use bounded_cache::{Limits, LruCache};
//!
//! // 64MB of payloads, at most 100k entries
//! let config = CacheConfig {
//!     limits: Limits::new(64 * 1024 * 1024, 100_000),
//!     initial_capacity: 1024,
//! };
//! let cache: LruCache<Vec<u8>> = LruCache::init(config, None);
//! assert_eq!(cache.limits().count_limit, 100_000);
//! ```

use crate::policy::Limits;
use std::fmt;

/// Configuration for an [`LruCache`](crate::LruCache).
///
/// # Fields
///
/// - `limits`: The size and count limits. `Limits::UNBOUNDED` by default.
/// - `initial_capacity`: Number of entries to pre-allocate room for in the
///   index and the recency list. Purely a performance hint.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CacheConfig {
    /// Capacity limits enforced on every mutation.
    pub limits: Limits,
    /// Pre-allocation hint, in entries.
    pub initial_capacity: usize,
}

impl CacheConfig {
    /// Creates a config with the given limits and no pre-allocation.
    pub const fn with_limits(size_limit: u64, count_limit: usize) -> Self {
        CacheConfig {
            limits: Limits::new(size_limit, count_limit),
            initial_capacity: 0,
        }
    }
}

impl fmt::Debug for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheConfig")
            .field("limits", &self.limits)
            .field("initial_capacity", &self.initial_capacity)
            .finish()
    }
}
