//! Cache Metrics
//!
//! Operation counters kept alongside the cache state and updated under the
//! same lock, so a snapshot is always consistent with the operations that
//! produced it.
//!
//! # Why BTreeMap?
//!
//! [`CacheMetrics::to_btreemap`] exports into a `BTreeMap` so that metrics
//! always appear in the same order, which keeps logs and test output
//! reproducible. With a dozen keys the lookup cost is irrelevant.

use std::collections::BTreeMap;

/// Counters describing what the cache has done since construction.
///
/// `has` is not a request: it neither hits nor misses. Entries pushed out by
/// a shrinking `set_limits` count as evictions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheMetrics {
    /// `get` calls that found their key.
    pub hits: u64,
    /// `get` calls that did not.
    pub misses: u64,
    /// Successful `set` calls for keys that were absent.
    pub insertions: u64,
    /// Successful `set` calls that replaced an existing entry.
    pub replacements: u64,
    /// `set` calls refused because the payload exceeds the size limit.
    pub rejections: u64,
    /// Entries evicted to satisfy the capacity limits.
    pub evictions: u64,
    /// Entries removed explicitly through `remove`.
    pub removals: u64,
    /// Total payload bytes admitted by `set`.
    pub bytes_written: u64,
    /// Total payload bytes served by `get` hits.
    pub bytes_served: u64,
    /// Total payload bytes dropped by eviction.
    pub bytes_evicted: u64,
}

impl CacheMetrics {
    pub(crate) fn record_hit(&mut self, size: u64) {
        self.hits += 1;
        self.bytes_served += size;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_write(&mut self, size: u64, replaced: bool) {
        if replaced {
            self.replacements += 1;
        } else {
            self.insertions += 1;
        }
        self.bytes_written += size;
    }

    pub(crate) fn record_rejection(&mut self) {
        self.rejections += 1;
    }

    pub(crate) fn record_eviction(&mut self, size: u64) {
        self.evictions += 1;
        self.bytes_evicted += size;
    }

    pub(crate) fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Total `get` calls.
    pub fn requests(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of `get` calls that hit, or 0.0 before the first request.
    pub fn hit_rate(&self) -> f64 {
        let requests = self.requests();
        if requests > 0 {
            self.hits as f64 / requests as f64
        } else {
            0.0
        }
    }

    /// Exports every counter and derived rate in alphabetical key order.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("bytes_evicted".to_string(), self.bytes_evicted as f64);
        metrics.insert("bytes_served".to_string(), self.bytes_served as f64);
        metrics.insert("bytes_written".to_string(), self.bytes_written as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("hits".to_string(), self.hits as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("misses".to_string(), self.misses as f64);
        metrics.insert("rejections".to_string(), self.rejections as f64);
        metrics.insert("removals".to_string(), self.removals as f64);
        metrics.insert("replacements".to_string(), self.replacements as f64);
        metrics.insert("requests".to_string(), self.requests() as f64);

        metrics
    }
}
