//! The worked end-to-end scenarios: cold fill, spillover, promotion, and the
//! two ghost-hit directions that tune `p`. Each scenario uses `c = 4` so
//! `p` starts at 2, unit-weight keys, and asserts both region membership and
//! recency order (inferred from which key a later spillover evicts first,
//! since list order itself isn't part of the public surface).

use arc_cache::arc::ArcCache;
use arc_cache::config::ArcCacheConfig;
use arc_cache::ops::ArcOps;
use arc_cache::region::Region;
use core::num::NonZeroU64;

struct UnitStore;

impl ArcOps<u64, u64> for UnitStore {
    fn create(&mut self, _key: &u64) -> Option<u64> {
        Some(1)
    }
    fn fetch(&mut self, key: &u64) -> Option<u64> {
        Some(*key)
    }
    fn evict(&mut self, _key: &u64, _payload: u64) {}
    fn destroy(&mut self, _key: &u64) {}
}

fn cache(c: u64) -> ArcCache<u64, u64, UnitStore> {
    ArcCache::new(UnitStore, ArcCacheConfig::new(NonZeroU64::new(c).unwrap()))
}

/// Scenario 1: cold fill. Lookup a, b, c, d in order with `c = 4`.
#[test]
fn scenario_1_cold_fill() {
    let mut cache = cache(4);
    for k in [1, 2, 3, 4] {
        cache.lookup(k).unwrap();
    }
    assert_eq!(cache.t1_len(), 4);
    assert_eq!(cache.t2_len(), 0);
    assert_eq!(cache.b1_len(), 0);
    assert_eq!(cache.b2_len(), 0);
    assert_eq!(cache.p(), 2);
    for k in [1, 2, 3, 4] {
        assert_eq!(cache.region_of(&k), Some(Region::T1));
    }
}

/// Scenario 2: spillover to B1. Continuing from scenario 1, lookup e (key 5).
/// `a` (key 1) is the LRU of T1 and is the one pushed to B1.
#[test]
fn scenario_2_spillover_to_b1() {
    let mut cache = cache(4);
    for k in [1, 2, 3, 4, 5] {
        cache.lookup(k).unwrap();
    }
    assert_eq!(cache.t1_len(), 4);
    assert_eq!(cache.b1_len(), 1);
    assert_eq!(cache.p(), 2);
    assert_eq!(cache.region_of(&1), Some(Region::B1));
    for k in [2, 3, 4, 5] {
        assert_eq!(cache.region_of(&k), Some(Region::T1));
    }
}

/// Scenario 3: promotion to T2. From the cold-fill state, lookup b (key 2)
/// again; it moves to T2's head and T1 shrinks to 3.
#[test]
fn scenario_3_promotion_to_t2() {
    let mut cache = cache(4);
    for k in [1, 2, 3, 4] {
        cache.lookup(k).unwrap();
    }
    cache.lookup(2).unwrap();
    assert_eq!(cache.region_of(&2), Some(Region::T2));
    assert_eq!(cache.t1_len(), 3);
    assert_eq!(cache.t2_len(), 1);
    assert_eq!(cache.b1_len(), 0);
    assert_eq!(cache.b2_len(), 0);
    assert_eq!(cache.p(), 2);
}

/// Scenario 4: a B1 ghost hit raises `p`. From the spillover state (a evicted
/// into B1), looking up a again promotes it to T2 and raises
/// `p = min(c, p + max(floor(B2/B1), 1)) = min(4, 2 + 1) = 3`.
#[test]
fn scenario_4_b1_ghost_hit_raises_p() {
    let mut cache = cache(4);
    for k in [1, 2, 3, 4, 5] {
        cache.lookup(k).unwrap();
    }
    assert_eq!(cache.region_of(&1), Some(Region::B1));
    cache.lookup(1).unwrap();
    assert_eq!(cache.region_of(&1), Some(Region::T2));
    assert_eq!(cache.p(), 3);
    // Room for the promotion was made by pushing T1's LRU (2) into B1.
    assert_eq!(cache.region_of(&2), Some(Region::B1));
}

/// Scenario 5: a B2 ghost hit lowers `p`. Build up T2 until it overflows and
/// drains its LRU into B2 (with B1 empty), then look the drained key up
/// again: it returns to T2 and `p` falls by `max(floor(B1/B2), 1) = 1`.
#[test]
fn scenario_5_b2_ghost_hit_lowers_p() {
    let mut cache = cache(2);
    cache.lookup(1).unwrap();
    cache.lookup(1).unwrap(); // 1 -> T2
    cache.lookup(2).unwrap();
    cache.lookup(2).unwrap(); // 2 -> T2; T2 = {2, 1}, size == c
    cache.lookup(3).unwrap(); // spills T2's LRU (1) into B2
    assert_eq!(cache.region_of(&1), Some(Region::B2));
    assert_eq!(cache.b1_len(), 0);
    let p_before = cache.p();
    cache.lookup(1).unwrap();
    assert_eq!(cache.region_of(&1), Some(Region::T2));
    assert_eq!(cache.p(), p_before.saturating_sub(1));
}

/// Scenario 6: fetch failure. `fetch` fails once for key `f`; the lookup
/// fails, f is left uncached, cache state and `p` are unchanged, and a
/// second lookup (with `fetch` now succeeding) admits it normally.
#[test]
fn scenario_6_fetch_failure_then_retry() {
    use arc_cache::ops::ArcError;
    use core::cell::Cell;

    struct FlakyOnce {
        failed: Cell<bool>,
    }
    impl ArcOps<u64, u64> for FlakyOnce {
        fn create(&mut self, _key: &u64) -> Option<u64> {
            Some(1)
        }
        fn fetch(&mut self, key: &u64) -> Option<u64> {
            if !self.failed.get() {
                self.failed.set(true);
                None
            } else {
                Some(*key)
            }
        }
        fn evict(&mut self, _key: &u64, _payload: u64) {}
        fn destroy(&mut self, _key: &u64) {}
    }

    let mut cache = ArcCache::new(
        FlakyOnce { failed: Cell::new(false) },
        ArcCacheConfig::new(NonZeroU64::new(4).unwrap()),
    );
    let p_before = cache.p();
    let len_before = cache.len();

    let result = cache.lookup(42);
    assert_eq!(result, Err(ArcError::FetchFailed));
    assert_eq!(cache.region_of(&42), None);
    assert_eq!(cache.len(), len_before);
    assert_eq!(cache.p(), p_before);

    assert_eq!(*cache.lookup(42).unwrap(), 42);
    assert_eq!(cache.region_of(&42), Some(Region::T1));
}
