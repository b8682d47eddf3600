//! Bounded LRU Store
//!
//! The single-threaded core behind [`LruCache`](crate::LruCache). It owns the
//! recency list, the key index, the aggregate counters, the capacity policy
//! and the metrics, and keeps them mutually consistent across every mutation.
//!
//! # Structure
//!
//! ```text
//!   Index: HashMap<String, Handle>
//!     "k3" ──────────────┐
//!     "k2" ───────┐      │
//!     "k1" ──┐    │      │
//!            ▼    ▼      ▼
//!   List:  [k1] ◄──► [k2] ◄──► [k3]
//!          MRU                 LRU
//!
//!   Usage: (count = 3, size = Σ entry.size)
//! ```
//!
//! # Mutation rules
//!
//! - `set` plans first and mutates second. A rejected plan leaves every
//!   field untouched, including the metrics apart from the rejection counter.
//! - Evictions walk from the back and skip the entry being replaced.
//! - Only `get` and a successful `set` reorder the list.

use crate::admission::{self, Admission};
use crate::config::CacheConfig;
use crate::entry::{ByteSize, Entry};
use crate::error::InvariantViolation;
use crate::index::{DefaultHashBuilder, Index};
use crate::list::{Handle, RecencyList};
use crate::metrics::CacheMetrics;
use crate::policy::{Limits, Usage};
use std::fmt;
use std::hash::BuildHasher;

/// Internal store containing the actual cache algorithm.
///
/// Not synchronised; the façade wraps it in a mutex.
pub(crate) struct Store<V, S = DefaultHashBuilder> {
    limits: Limits,
    usage: Usage,
    list: RecencyList<Entry<V>>,
    index: Index<S>,
    metrics: CacheMetrics,
}

impl<V, S: BuildHasher> Store<V, S> {
    pub(crate) fn with_hasher(config: CacheConfig, hash_builder: S) -> Self {
        Store {
            limits: config.limits,
            usage: Usage::default(),
            list: RecencyList::with_capacity(config.initial_capacity),
            index: Index::with_capacity_and_hasher(config.initial_capacity, hash_builder),
            metrics: CacheMetrics::default(),
        }
    }

    #[inline]
    pub(crate) fn limits(&self) -> Limits {
        self.limits
    }

    #[inline]
    pub(crate) fn usage(&self) -> Usage {
        self.usage
    }

    #[inline]
    pub(crate) fn count(&self) -> usize {
        self.usage.count
    }

    #[inline]
    pub(crate) fn size(&self) -> u64 {
        self.usage.size
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.usage.count == 0
    }

    #[inline]
    pub(crate) fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// Returns true if `key` is present. Does not touch recency.
    #[inline]
    pub(crate) fn has(&self, key: &str) -> bool {
        self.index.contains(key)
    }

    /// Returns the payload for `key` and makes it the most recently used.
    pub(crate) fn get(&mut self, key: &str) -> Option<&V> {
        let Some(handle) = self.index.get(key) else {
            self.metrics.record_miss();
            return None;
        };
        self.list.move_to_front(handle);
        let Some(entry) = self.list.get(handle) else {
            lost_entry(key);
            return None;
        };
        self.metrics.record_hit(entry.size());
        Some(entry.value())
    }

    /// Removes `key`, returning its entry if it was present.
    pub(crate) fn remove(&mut self, key: &str) -> Option<Entry<V>> {
        let handle = self.index.remove(key)?;
        let Some(entry) = self.list.remove(handle) else {
            lost_entry(key);
            return None;
        };
        self.usage.credit(entry.size());
        self.metrics.record_removal();
        self.verify();
        Some(entry)
    }

    /// Replaces the policy and evicts LRU entries until both limits hold.
    pub(crate) fn set_limits(&mut self, limits: Limits) {
        let previous = self.limits;
        self.limits = limits;
        let prune = admission::prune_count(
            limits,
            self.usage,
            self.list.iter_rev().map(|(_, entry)| entry.size()),
        );
        tracing::debug!(
            "[lru]: limits {:?} => {:?}, evicting {} entries",
            previous,
            limits,
            prune
        );
        self.evict(prune, None);
        self.verify();
    }

    /// Drops every entry. Limits and metrics are kept.
    pub(crate) fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
        self.usage = Usage::default();
        self.verify();
    }

    /// Keys from most to least recently used.
    pub(crate) fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.list.iter().map(|(_, entry)| entry.key())
    }

    /// Evicts up to `prune` entries from the back, never touching `keep`.
    fn evict(&mut self, mut prune: usize, keep: Option<Handle>) {
        let mut cursor = self.list.back();
        while prune > 0 {
            let Some(handle) = cursor else {
                break;
            };
            cursor = self.list.prev(handle);
            if Some(handle) == keep {
                continue;
            }
            // the cursor came from the list itself, so the node is live
            let Some(entry) = self.list.remove(handle) else {
                lost_node(handle);
                break;
            };
            self.index.remove(entry.key());
            self.usage.credit(entry.size());
            self.metrics.record_eviction(entry.size());
            tracing::trace!(
                "[lru]: evicted {:?} ({} bytes), usage now {:?}",
                entry.key(),
                entry.size(),
                self.usage
            );
            prune -= 1;
        }
    }

    /// Cheap checks always run in debug builds; the full audit only with
    /// `strict_assertions`.
    #[inline]
    fn verify(&self) {
        debug_assert_eq!(self.usage.count, self.list.len());
        debug_assert_eq!(self.usage.count, self.index.len());
        if cfg!(feature = "strict_assertions") {
            if let Err(err) = self.check_invariants() {
                panic!("[lru]: invariant violated: {err}");
            }
        }
    }

    /// Audits the list, the index and the counters against each other and
    /// against the limits.
    pub(crate) fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.usage.count != self.list.len() || self.usage.count != self.index.len() {
            return Err(InvariantViolation::CountMismatch {
                counter: self.usage.count,
                list: self.list.len(),
                index: self.index.len(),
            });
        }

        // With equal counts, every list entry resolving to its own handle
        // also accounts for every index key.
        let mut actual = 0u64;
        for (handle, entry) in self.list.iter() {
            if self.index.get(entry.key()) != Some(handle) {
                return Err(InvariantViolation::OrphanEntry {
                    key: entry.key().to_owned(),
                });
            }
            actual += entry.size();
        }
        if actual != self.usage.size {
            return Err(InvariantViolation::SizeMismatch {
                counter: self.usage.size,
                actual,
            });
        }

        if self.limits.is_count_bounded() && self.usage.count > self.limits.count_limit {
            return Err(InvariantViolation::CountLimitExceeded {
                count: self.usage.count,
                limit: self.limits.count_limit,
            });
        }
        if self.limits.is_size_bounded() && self.usage.size > self.limits.size_limit {
            return Err(InvariantViolation::SizeLimitExceeded {
                size: self.usage.size,
                limit: self.limits.size_limit,
            });
        }

        Ok(())
    }
}

impl<V: ByteSize, S: BuildHasher> Store<V, S> {
    /// Stores `value` under `key` as the most recently used entry.
    ///
    /// Returns `false`, leaving the store untouched, when the payload alone
    /// exceeds the size limit.
    pub(crate) fn set(&mut self, key: String, value: V) -> bool {
        let entry = Entry::new(key, value);
        let replaced = self.index.get(entry.key());
        let replaced_size = replaced
            .and_then(|handle| self.list.get(handle))
            .map(Entry::size);

        let plan = admission::plan(
            self.limits,
            self.usage,
            entry.size(),
            replaced_size,
            self.list
                .iter_rev()
                .filter(|(handle, _)| Some(*handle) != replaced)
                .map(|(_, lru)| lru.size()),
        );
        let prune = match plan {
            Admission::Reject => {
                tracing::debug!(
                    "[lru]: rejected {:?}: {} bytes exceeds size limit {}",
                    entry.key(),
                    entry.size(),
                    self.limits.size_limit
                );
                self.metrics.record_rejection();
                return false;
            }
            Admission::Admit { prune } => prune,
        };

        self.evict(prune, replaced);

        if let Some(handle) = replaced {
            match self.list.remove(handle) {
                Some(old) => self.usage.credit(old.size()),
                None => lost_entry(entry.key()),
            }
        }

        let size = entry.size();
        let key = entry.key().to_owned();
        let handle = self.list.push_front(entry);
        self.index.insert(key, handle);
        self.usage.charge(size);
        self.metrics.record_write(size, replaced.is_some());
        self.verify();
        true
    }
}

/// The index named a handle the list no longer holds.
///
/// Only reachable through a bug in this crate. Panics in debug builds and
/// with `strict_assertions`; otherwise logs and lets the caller bail out.
#[cold]
#[track_caller]
fn lost_entry(key: &str) {
    if cfg!(any(debug_assertions, feature = "strict_assertions")) {
        panic!("[lru]: index and list disagree on key {key:?}");
    }
    tracing::error!("[lru]: index and list disagree on key {:?}", key);
}

/// A node reached by walking the list was not live.
#[cold]
#[track_caller]
fn lost_node(handle: Handle) {
    if cfg!(any(debug_assertions, feature = "strict_assertions")) {
        panic!("[lru]: list walk reached dead node {handle:?}");
    }
    tracing::error!("[lru]: list walk reached dead node {:?}", handle);
}

impl<V, S> fmt::Debug for Store<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("limits", &self.limits)
            .field("usage", &self.usage)
            .finish()
    }
}
