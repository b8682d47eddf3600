//! Correctness Tests for the Bounded LRU Cache
//!
//! Validates eviction, admission and replacement behaviour using small,
//! deterministic access patterns. Each test names exactly which keys must be
//! gone and which must survive after the operation under test.
//!
//! ## Test Strategy
//! - Tiny limits (a handful of entries or tens of bytes)
//! - Fixed-width payloads so size arithmetic is obvious
//! - `check_invariants` after every scenario

use bounded_cache::config::CacheConfig;
use bounded_cache::{Limits, LruCache, Usage};

// ============================================================================
// HELPERS
// ============================================================================

/// Cache of static string payloads with the given limits.
fn make_cache(size_limit: u64, count_limit: usize) -> LruCache<&'static str> {
    let cache = LruCache::new();
    cache.set_limits(size_limit, count_limit);
    cache
}

/// Cache of owned string payloads with the given limits.
fn make_string_cache(size_limit: u64, count_limit: usize) -> LruCache<String> {
    LruCache::init(CacheConfig::with_limits(size_limit, count_limit), None)
}

/// Inserts `k0..kN` with 10-byte values `content--0..content--N`.
fn fill_ten_byte_values(cache: &LruCache<String>, n: usize) {
    for i in 0..n {
        assert!(cache.set(format!("k{}", i), format!("content--{}", i)));
    }
}

fn assert_consistent<V: bounded_cache::ByteSize + Clone>(cache: &LruCache<V>) {
    if let Err(err) = cache.check_invariants() {
        panic!("cache inconsistent: {err}");
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn count_limit_eviction() {
    let cache = make_cache(0, 4);
    for (k, v) in [
        ("k0", "c0"),
        ("k1", "c1"),
        ("k2", "c2"),
        ("k3", "c3"),
        ("k4", "c4"),
    ] {
        assert!(cache.set(k, v));
    }

    assert_eq!(cache.count(), 4);
    assert!(!cache.has("k0"));
    for (k, v) in [("k1", "c1"), ("k2", "c2"), ("k3", "c3"), ("k4", "c4")] {
        assert!(cache.has(k));
        assert_eq!(cache.get(k), Some(v));
    }
    assert_consistent(&cache);
}

#[test]
fn size_limit_eviction_with_uniform_values() {
    let cache = make_string_cache(40, 0);
    fill_ten_byte_values(&cache, 5);

    assert_eq!(cache.count(), 4);
    assert_eq!(cache.size(), 40);
    assert!(!cache.has("k0"));
    for i in 1..=4 {
        assert_eq!(
            cache.get(&format!("k{}", i)),
            Some(format!("content--{}", i))
        );
    }
    assert_consistent(&cache);
}

#[test]
fn combined_limits_with_oversized_insertion() {
    let cache = make_string_cache(40, 4);
    fill_ten_byte_values(&cache, 5);

    assert!(cache.set("k5", "12345678901234567890".to_string()));

    assert_eq!(cache.count(), 3);
    assert_eq!(cache.size(), 40);
    assert!(!cache.has("k0"));
    assert!(!cache.has("k1"));
    assert!(!cache.has("k2"));
    assert!(cache.has("k3"));
    assert!(cache.has("k4"));
    assert!(cache.has("k5"));
    assert_eq!(cache.get("k5"), Some("12345678901234567890".to_string()));
    assert_consistent(&cache);
}

#[test]
fn single_item_oversize_rejection() {
    let cache = make_cache(5, 0);
    assert!(!cache.set("k", "1234567890"));
    assert_eq!(cache.count(), 0);
    assert_eq!(cache.size(), 0);
    assert!(!cache.has("k"));
    assert_eq!(cache.metrics().rejections, 1);
}

#[test]
fn exact_fit_boundary() {
    let cache = make_cache(5, 0);
    assert!(cache.set("k", "12345"));
    assert_eq!(cache.count(), 1);
    assert_eq!(cache.size(), 5);
    assert_eq!(cache.get("k"), Some("12345"));
}

#[test]
fn replacement_within_capacity() {
    let cache = make_cache(5, 0);
    assert!(cache.set("k", "12345"));
    assert!(cache.set("k", "54321"));
    assert_eq!(cache.count(), 1);
    assert_eq!(cache.size(), 5);
    assert_eq!(cache.get("k"), Some("54321"));
    assert_consistent(&cache);
}

#[test]
fn get_bumps_entry_to_mru() {
    let cache = make_cache(0, 3);
    cache.set("k0", "c0");
    cache.set("k1", "c1");
    cache.set("k2", "c2");
    assert_eq!(cache.get("k0"), Some("c0"));
    cache.set("k3", "c3");

    assert!(cache.has("k0"));
    assert!(!cache.has("k1"));
    assert!(cache.has("k2"));
    assert!(cache.has("k3"));
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[test]
fn successful_set_is_immediately_readable() {
    let cache = make_string_cache(64, 8);
    for i in 0..100 {
        let key = format!("key{}", i % 13);
        let value = "x".repeat(i % 20);
        if cache.set(key.clone(), value.clone()) {
            assert_eq!(cache.get(&key), Some(value));
        }
    }
    assert_consistent(&cache);
}

#[test]
fn rejected_set_leaves_previous_value() {
    let cache = make_cache(8, 0);
    assert_eq!(cache.get("k"), None);
    assert!(!cache.set("k", "123456789"));
    assert_eq!(cache.get("k"), None);

    assert!(cache.set("k", "12345678"));
    assert!(!cache.set("k", "123456789"));
    assert_eq!(cache.get("k"), Some("12345678"));
    assert_eq!(cache.usage(), Usage { count: 1, size: 8 });
}

#[test]
fn set_and_get_move_key_to_front() {
    let cache = make_cache(0, 0);
    for k in ["a", "b", "c", "d"] {
        cache.set(k, "v");
        assert_eq!(cache.keys()[0], k);
    }
    cache.get("b");
    assert_eq!(cache.keys(), vec!["b", "d", "c", "a"]);
    cache.set("c", "w");
    assert_eq!(cache.keys(), vec!["c", "b", "d", "a"]);
    cache.has("a");
    cache.remove("d");
    assert_eq!(cache.keys(), vec!["c", "b", "a"]);
}

#[test]
fn eviction_takes_longest_unaccessed_first() {
    let cache = make_string_cache(0, 0);
    for i in 0..6 {
        cache.set(format!("k{}", i), "0123456789".to_string());
    }
    // recency now, MRU first: k3 k1 k5 k4 k2 k0
    cache.get("k1");
    cache.get("k3");

    cache.set_limits(30, 0);
    assert_eq!(cache.keys(), vec!["k3", "k1", "k5"]);
    assert_eq!(cache.metrics().evictions, 3);
}

#[test]
fn dual_limit_evicts_larger_prune_count() {
    let cache = make_string_cache(100, 3);
    cache.set("a", "1".repeat(10));
    cache.set("b", "2".repeat(10));
    cache.set("c", "3".repeat(10));

    // count forces one eviction, size forces none
    cache.set("d", "4".repeat(10));
    assert_eq!(cache.keys(), vec!["d", "c", "b"]);

    // size forces two evictions (30 + 90 - 100 = 20), count forces one
    cache.set("e", "5".repeat(90));
    assert_eq!(cache.keys(), vec!["e", "d"]);
    assert_eq!(cache.size(), 100);
    assert_consistent(&cache);
}

#[test]
fn replacement_does_not_evict_unrelated_keys() {
    let cache = make_string_cache(40, 4);
    fill_ten_byte_values(&cache, 4);

    // same size, full cache on both dimensions
    assert!(cache.set("k0", "CONTENT--0".to_string()));
    assert_eq!(cache.count(), 4);
    assert_eq!(cache.metrics().evictions, 0);

    // shrink, then grow back into the headroom it freed
    assert!(cache.set("k2", "tiny".to_string()));
    assert!(cache.set("k2", "0123456789".to_string()));
    assert_eq!(cache.count(), 4);
    assert_eq!(cache.metrics().evictions, 0);

    // growth beyond the headroom evicts exactly one LRU entry
    assert!(cache.set("k2", "012345678901234".to_string()));
    assert_eq!(cache.metrics().evictions, 1);
    assert!(!cache.has("k1"));
    assert_eq!(cache.size(), 35);
    assert_consistent(&cache);
}

#[test]
fn replacing_the_lru_entry_skips_it_during_eviction() {
    let cache = make_string_cache(30, 0);
    fill_ten_byte_values(&cache, 3);

    // k0 is LRU and is also the key being replaced
    assert!(cache.set("k0", "01234567890123456789".to_string()));
    assert_eq!(cache.keys(), vec!["k0", "k2"]);
    assert_eq!(cache.size(), 30);
}

#[test]
fn drop_of_absent_key_is_a_no_op() {
    let cache = make_cache(0, 2);
    cache.set("a", "1");
    let before = (cache.keys(), cache.usage());
    assert!(!cache.remove("missing"));
    assert_eq!((cache.keys(), cache.usage()), before);
    assert!(cache.remove("a"));
    assert!(!cache.remove("a"));
    assert!(cache.is_empty());
}

// ============================================================================
// EDGE CASES
// ============================================================================

#[test]
fn unbounded_cache_never_evicts() {
    let cache = make_string_cache(0, 0);
    for i in 0..1000 {
        assert!(cache.set(format!("k{}", i), "v".repeat(i % 50)));
    }
    assert_eq!(cache.count(), 1000);
    assert_eq!(cache.metrics().evictions, 0);
}

#[test]
fn zero_length_payloads_use_count_only() {
    let cache = make_cache(1, 3);
    assert!(cache.set("a", ""));
    assert!(cache.set("b", ""));
    assert!(cache.set("c", "x"));
    assert_eq!(cache.usage(), Usage { count: 3, size: 1 });
    assert!(cache.set("d", ""));
    assert!(!cache.has("a"));
    assert_eq!(cache.count(), 3);
}

#[test]
fn single_entry_cache_replaces_itself() {
    let cache = make_cache(0, 1);
    cache.set("a", "1");
    cache.set("b", "2");
    assert_eq!(cache.keys(), vec!["b"]);
    cache.set("b", "3");
    assert_eq!(cache.get("b"), Some("3"));
    assert_eq!(cache.metrics().evictions, 1);
}

#[test]
fn shrinking_limits_restores_compliance_immediately() {
    let cache = make_string_cache(0, 0);
    fill_ten_byte_values(&cache, 5);
    cache.set_limits(25, 0);
    assert_eq!(cache.limits(), Limits::new(25, 0));
    assert_eq!(cache.keys(), vec!["k4", "k3"]);
    assert_eq!(cache.size(), 20);
    assert_consistent(&cache);
}

#[test]
fn empty_key_is_an_ordinary_key() {
    let cache = make_cache(0, 0);
    assert!(cache.set("", "value"));
    assert!(cache.has(""));
    assert_eq!(cache.get(""), Some("value"));
    assert!(cache.remove(""));
}
