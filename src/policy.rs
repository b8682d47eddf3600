//! Capacity policy and aggregate counters.
//!
//! The policy is a plain pair of limits rather than a strategy object: the
//! two-dimensional bound is fixed. A limit of `0` disables that dimension.

use std::fmt;

/// The pair of capacity limits enforced by the cache.
///
/// # Examples
///
/// ```
/// use bounded_cache::Limits;
///
/// let limits = Limits::new(40, 4);
/// assert!(limits.admits(40));
/// assert!(!limits.admits(41));
///
/// // 0 means unbounded
/// assert!(Limits::UNBOUNDED.admits(u64::MAX));
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Limits {
    /// Maximum aggregate payload bytes. `0` disables the size bound.
    pub size_limit: u64,
    /// Maximum number of entries. `0` disables the count bound.
    pub count_limit: usize,
}

impl Limits {
    /// No bound on either dimension.
    pub const UNBOUNDED: Limits = Limits {
        size_limit: 0,
        count_limit: 0,
    };

    /// Creates a policy from a size limit and a count limit.
    pub const fn new(size_limit: u64, count_limit: usize) -> Self {
        Limits {
            size_limit,
            count_limit,
        }
    }

    /// Returns true if the size dimension is bounded.
    #[inline]
    pub const fn is_size_bounded(&self) -> bool {
        self.size_limit > 0
    }

    /// Returns true if the count dimension is bounded.
    #[inline]
    pub const fn is_count_bounded(&self) -> bool {
        self.count_limit > 0
    }

    /// Returns true if a single item of `size` bytes could ever fit.
    ///
    /// The boundary is inclusive: an item exactly as large as the size limit
    /// is admitted.
    #[inline]
    pub const fn admits(&self, size: u64) -> bool {
        !self.is_size_bounded() || size <= self.size_limit
    }

    /// Returns true if `usage` is within both limits.
    #[inline]
    pub const fn contains(&self, usage: Usage) -> bool {
        (!self.is_count_bounded() || usage.count <= self.count_limit)
            && (!self.is_size_bounded() || usage.size <= self.size_limit)
    }
}

impl fmt::Debug for Limits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Limits")
            .field("size_limit", &self.size_limit)
            .field("count_limit", &self.count_limit)
            .finish()
    }
}

/// A consistent snapshot of the aggregate counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Usage {
    /// Number of entries.
    pub count: usize,
    /// Sum of entry sizes in bytes.
    pub size: u64,
}

impl Usage {
    #[inline]
    pub(crate) fn charge(&mut self, size: u64) {
        self.count += 1;
        self.size += size;
    }

    #[inline]
    pub(crate) fn credit(&mut self, size: u64) {
        debug_assert!(self.count > 0, "credit on empty usage");
        debug_assert!(self.size >= size, "credit exceeds charged size");
        self.count -= 1;
        self.size -= size;
    }
}
