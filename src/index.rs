//! Key to list-position index.
//!
//! Maps each present key to the [`Handle`] of the recency-list node holding
//! its entry, giving O(1) lookup, insertion and removal. Lookups take `&str`
//! so callers never allocate a `String` just to probe the cache.

use crate::list::Handle;
use std::fmt;
use std::hash::BuildHasher;

#[cfg(feature = "hashbrown")]
pub use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
pub use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Exactly one handle per present key.
pub(crate) struct Index<S = DefaultHashBuilder> {
    map: HashMap<String, Handle, S>,
}

impl<S: BuildHasher> Index<S> {
    pub(crate) fn with_capacity_and_hasher(cap: usize, hash_builder: S) -> Self {
        Index {
            map: HashMap::with_capacity_and_hasher(cap, hash_builder),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn get(&self, key: &str) -> Option<Handle> {
        self.map.get(key).copied()
    }

    #[inline]
    pub(crate) fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Maps `key` to `handle`, returning the handle it replaced.
    #[inline]
    pub(crate) fn insert(&mut self, key: String, handle: Handle) -> Option<Handle> {
        self.map.insert(key, handle)
    }

    #[inline]
    pub(crate) fn remove(&mut self, key: &str) -> Option<Handle> {
        self.map.remove(key)
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }
}

impl<S> fmt::Debug for Index<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Index")
            .field("len", &self.map.len())
            .finish()
    }
}
