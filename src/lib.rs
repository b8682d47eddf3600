#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Quick Reference
//!
//! | Operation | Method | Effect on recency |
//! |-----------|--------|-------------------|
//! | construct | [`LruCache::new`], [`LruCache::with_limits`], [`LruCache::init`] | none |
//! | setLimits | [`LruCache::set_limits`] | evicts LRU entries if now over a limit |
//! | set | [`LruCache::set`] | key becomes MRU |
//! | get | [`LruCache::get`], [`LruCache::get_with`] | key becomes MRU |
//! | has | [`LruCache::has`] | none |
//! | drop | [`LruCache::remove`] | none |
//! | count / size | [`LruCache::count`], [`LruCache::size`], [`LruCache::usage`] | none |
//!
//! ## Performance Characteristics
//!
//! | Operation | Time | Notes |
//! |-----------|------|-------|
//! | get / has / remove | O(1) | hash lookup + list relink |
//! | set | O(1 + K) | K = entries evicted by this call |
//! | set_limits | O(1 + K) | K = entries evicted to fit the new limits |
//! | keys / check_invariants | O(n) | diagnostics |
//!
//! ## Dual-Limit Capacity
//!
//! ```rust
//! use bounded_cache::LruCache;
//!
//! // At most 4 entries AND at most 40 payload bytes
//! let cache: LruCache<&'static str> = LruCache::with_limits(40, 4);
//! for (key, value) in [("k1", "content--1"), ("k2", "content--2"),
//!                      ("k3", "content--3"), ("k4", "content--4")] {
//!     assert!(cache.set(key, value));
//! }
//!
//! // A 20-byte value pushes out the two least recently used entries
//! assert!(cache.set("k5", "12345678901234567890"));
//! assert_eq!(cache.count(), 3);
//! assert_eq!(cache.size(), 40);
//! assert!(!cache.has("k1") && !cache.has("k2"));
//! ```
//!
//! ## Modules
//!
//! - [`cache`]: The thread-safe façade
//! - [`config`]: Construction-time configuration
//! - [`entry`]: The [`ByteSize`] payload measure
//! - [`metrics`]: Operation counters
//! - [`error`]: Invariant violation reporting

/// Stored record and payload measurement.
///
/// Provides the [`ByteSize`] trait the cache uses to charge payloads against
/// its size limit.
pub mod entry;

/// Arena-backed doubly linked recency list.
///
/// **Note**: This module is internal infrastructure. Its handles are only
/// meaningful together with the index that stores them.
pub(crate) mod list;

/// Key to list-handle index.
pub(crate) mod index;

/// Capacity limits and aggregate counters.
pub mod policy;

/// Admission and eviction planning.
pub(crate) mod admission;

/// The unsynchronised cache core.
pub(crate) mod store;

/// Thread-safe LRU cache.
///
/// Provides [`LruCache`], a single-mutex cache bounded by entry count and by
/// aggregate payload size.
pub mod cache;

/// Cache configuration structures.
pub mod config;

/// Cache metrics.
///
/// Counters for hits, misses, insertions, replacements, rejections and
/// evictions, exported in deterministic order.
pub mod metrics;

/// Internal consistency errors.
pub mod error;

pub use cache::LruCache;
pub use config::CacheConfig;
pub use entry::ByteSize;
pub use error::InvariantViolation;
pub use index::DefaultHashBuilder;
pub use metrics::CacheMetrics;
pub use policy::{Limits, Usage};
