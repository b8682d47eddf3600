//! Admission and Eviction Planning
//!
//! Pure logic that decides, for a prospective insertion, whether the item is
//! admitted at all and how many least recently used entries must go first.
//! Nothing here touches the list or the index; the store feeds in the
//! current counters and a back-to-front walk of entry sizes and applies the
//! resulting plan.
//!
//! # Algorithm
//!
//! ```text
//! 1. replaced  = size of the entry already stored under the key, if any
//! 2. reject    if size_limit > 0 && new_size > size_limit
//! 3. future    = usage - replaced + new
//!    by_count  = future.count - count_limit            (0 if unbounded)
//!    by_size   = LRU entries whose sizes cover
//!                future.size - size_limit              (0 if unbounded)
//!    prune     = max(by_count, by_size)
//! ```
//!
//! The replaced entry is accounted for before any eviction count is taken
//! and is never one of the walked candidates, so a same-key `set` only
//! evicts other entries when the growth of its payload strictly requires it.
//!
//! # Examples
//!
//! ```text
//! limits = (size 40, count 4), LRU→MRU sizes = [10, 10, 10, 10]
//!
//! set(new key, 20 bytes):
//!   by_count = 4 + 1 - 4           = 1
//!   by_size  = 40 + 20 - 40 = 20   → walk 10, 10 → 2
//!   prune    = 2
//! ```

use crate::policy::{Limits, Usage};

/// Outcome of planning a `set`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Admission {
    /// The item can never fit; the cache must stay untouched.
    Reject,
    /// The item fits after evicting `prune` entries from the LRU end.
    Admit {
        /// Number of entries to evict, excluding any same-key entry.
        prune: usize,
    },
}

/// Plans the insertion of an item of `new_size` bytes.
///
/// `replaced` is the size of the entry currently stored under the same key,
/// if any. `lru_sizes` yields the sizes of eviction candidates from least to
/// most recently used and must not include the replaced entry. It is only
/// consumed as far as the size bound requires.
pub(crate) fn plan<I>(
    limits: Limits,
    usage: Usage,
    new_size: u64,
    replaced: Option<u64>,
    lru_sizes: I,
) -> Admission
where
    I: IntoIterator<Item = u64>,
{
    if !limits.admits(new_size) {
        return Admission::Reject;
    }

    let (replace_count, replace_size) = replaced.map_or((0, 0), |size| (1, size));
    let future = Usage {
        count: usage.count + 1 - replace_count,
        size: (usage.size - replace_size).saturating_add(new_size),
    };

    Admission::Admit {
        prune: prune_count(limits, future, lru_sizes),
    }
}

/// Number of LRU entries to evict so that `future` fits within `limits`.
///
/// Also used on its own when limits shrink at runtime, with `future` being
/// the current usage.
pub(crate) fn prune_count<I>(limits: Limits, future: Usage, lru_sizes: I) -> usize
where
    I: IntoIterator<Item = u64>,
{
    let by_count = if limits.is_count_bounded() {
        future.count.saturating_sub(limits.count_limit)
    } else {
        0
    };

    let by_size = if limits.is_size_bounded() && future.size > limits.size_limit {
        let excess = future.size - limits.size_limit;
        let mut sizes = lru_sizes.into_iter();
        let mut freed = 0u64;
        let mut walked = 0usize;
        while freed < excess {
            let Some(size) = sizes.next() else {
                break;
            };
            freed += size;
            walked += 1;
        }
        walked
    } else {
        0
    };

    by_count.max(by_size)
}
