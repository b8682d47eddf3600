//! Internal consistency errors.
//!
//! The cache has no fallible operations in normal use: a rejected `set` is a
//! `false` return and a missing key is `None`. The only error is a broken
//! invariant between the recency list, the index and the counters, which is
//! always a bug in this crate. [`LruCache::check_invariants`] reports it;
//! with the `strict_assertions` feature every mutation audits itself and
//! panics on the first violation.
//!
//! [`LruCache::check_invariants`]: crate::LruCache::check_invariants

use thiserror::Error;

/// A broken relationship between the list, the index and the counters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The entry counter, the list length and the index size disagree.
    #[error("count mismatch: counter {counter}, list {list}, index {index}")]
    CountMismatch {
        /// Value of the count counter.
        counter: usize,
        /// Number of nodes in the recency list.
        list: usize,
        /// Number of keys in the index.
        index: usize,
    },

    /// The size counter is not the sum of entry sizes.
    #[error("size mismatch: counter {counter}, sum of entries {actual}")]
    SizeMismatch {
        /// Value of the size counter.
        counter: u64,
        /// Sum of the sizes stored in the list.
        actual: u64,
    },

    /// A list node is not reachable through the index.
    #[error("list entry {key:?} is not reachable through the index")]
    OrphanEntry {
        /// Key stored in the unreachable node.
        key: String,
    },

    /// More entries than the count limit allows.
    #[error("count {count} exceeds count limit {limit}")]
    CountLimitExceeded {
        /// Current entry count.
        count: usize,
        /// Configured limit.
        limit: usize,
    },

    /// More bytes than the size limit allows.
    #[error("size {size} exceeds size limit {limit}")]
    SizeLimitExceeded {
        /// Current aggregate size.
        size: u64,
        /// Configured limit.
        limit: u64,
    },
}
