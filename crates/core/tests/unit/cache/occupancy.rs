//! Occupancy Set Tests.
//!
//! A set never grows past its associativity, never holds duplicates, and
//! refuses to evict an address it does not hold.

use cachesim_core::cache::{Cache, CacheSet};
use cachesim_core::common::SetViolation;
use cachesim_core::config::{CacheConfig, Mapping, ReplacementPolicy};
use proptest::prelude::*;

#[test]
fn full_set_rejects_insert_without_truncation() {
    let mut set = CacheSet::new(2);
    set.insert(1).unwrap();
    set.insert(2).unwrap();
    assert_eq!(set.insert(3), Err(SetViolation::InsertIntoFullSet));
    assert_eq!(set.members(), &[1, 2]);
}

#[test]
fn evict_then_insert_reuses_capacity() {
    let mut set = CacheSet::new(2);
    set.insert(1).unwrap();
    set.insert(2).unwrap();
    set.evict(1).unwrap();
    set.insert(3).unwrap();
    assert_eq!(set.members(), &[2, 3]);
    assert!(set.is_full());
}

#[test]
fn cache_contains_follows_mapping() {
    let geometry = CacheConfig::new(4, Mapping::SetAssociative, Some(2), ReplacementPolicy::Lru)
        .validate()
        .unwrap();
    let mut cache = Cache::new(geometry);
    let (set, _) = cache.partition_mut(cache.set_index(5)).unwrap();
    set.insert(5).unwrap();
    assert!(cache.contains(5));
    assert!(!cache.contains(3));
    assert_eq!(cache.snapshot(), vec![vec![], vec![5]]);
}

proptest! {
    /// Inserting with evict-on-full never violates the bound or creates duplicates.
    #[test]
    fn set_stays_bounded_and_unique(ways in 1usize..6, addrs in prop::collection::vec(0u64..12, 0..64)) {
        let mut set = CacheSet::new(ways);
        for a in addrs {
            if set.contains(a) {
                continue;
            }
            if set.is_full() {
                let oldest = set.members()[0];
                set.evict(oldest).unwrap();
            }
            set.insert(a).unwrap();
            prop_assert!(set.len() <= ways);
            let mut sorted = set.members().to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), set.len());
        }
    }
}
