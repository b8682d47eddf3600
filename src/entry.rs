//! Cache Entry Type
//!
//! This module provides the [`ByteSize`] trait used to measure payloads and
//! the crate-internal `Entry<V>` record the cache stores them in.
//!
//! # Design Philosophy
//!
//! An entry is immutable once constructed. Updating a key is modelled as
//! destroying the old entry and creating a new one, so the `size` captured at
//! construction is never recomputed and always matches what the aggregate
//! size counter was charged.
//!
//! # Memory Layout
//!
//! - `key: String` - the logical key (24 bytes + heap)
//! - `value: V` - the user's payload
//! - `size: u64` - 8 bytes, the payload's byte length
//!
//! # Examples
//!
//! ```
//! use bounded_cache::entry::ByteSize;
//!
//! assert_eq!(b"alice".to_vec().byte_size(), 5);
//! assert_eq!("héllo".byte_size(), 6);
//! ```

use std::fmt;
use std::sync::Arc;

/// Reports the number of bytes a payload occupies, without copying it.
///
/// The cache charges this amount against its size limit when the payload is
/// stored. Implementations must be cheap and must return the same value for
/// the same payload for as long as it lives in the cache.
pub trait ByteSize {
    /// Returns the payload length in bytes.
    fn byte_size(&self) -> u64;
}

macro_rules! impl_byte_size_by_len {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ByteSize for $ty {
                #[inline]
                fn byte_size(&self) -> u64 {
                    self.len() as u64
                }
            }
        )*
    };
}

impl_byte_size_by_len!(
    Vec<u8>,
    String,
    Box<[u8]>,
    Box<str>,
    Arc<[u8]>,
    Arc<str>,
    &'static [u8],
    &'static str,
);

#[cfg(feature = "bytes")]
impl_byte_size_by_len!(bytes::Bytes);

impl<const N: usize> ByteSize for [u8; N] {
    #[inline]
    fn byte_size(&self) -> u64 {
        N as u64
    }
}

/// A key/payload/size record owned by the cache.
pub(crate) struct Entry<V> {
    key: String,
    value: V,
    size: u64,
}

impl<V: ByteSize> Entry<V> {
    /// Creates a new entry, measuring the payload once.
    #[inline]
    pub(crate) fn new(key: String, value: V) -> Self {
        let size = value.byte_size();
        Self { key, value, size }
    }
}

impl<V> Entry<V> {
    /// Returns the key this entry is stored under.
    #[inline]
    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    /// Returns a reference to the payload.
    #[inline]
    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    /// Returns the payload size captured at construction.
    #[inline]
    pub(crate) fn size(&self) -> u64 {
        self.size
    }

}

impl<V> fmt::Debug for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("size", &self.size)
            .finish()
    }
}
