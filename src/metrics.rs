//! Cache metrics for the ARC core.
//!
//! Mirrors the metrics approach used throughout this codebase: a common set
//! of request/hit/eviction counters plus algorithm-specific fields, exposed
//! through a `BTreeMap` for deterministic, reproducible ordering (important
//! for tests and for comparing runs, not for raw lookup speed — a `BTreeMap`
//! over a dozen-odd keys costs nothing that matters).

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Common counters tracked regardless of which list satisfied a lookup.
#[derive(Debug, Default, Clone)]
pub struct CoreCacheMetrics {
    /// Total number of `lookup` calls made.
    pub requests: u64,
    /// Number of lookups satisfied without invoking `create` or `fetch`
    /// (i.e. the key was already resident in `T1` or `T2`).
    pub cache_hits: u64,
    /// Number of objects evicted from `T1` or `T2` to a ghost list.
    pub evictions: u64,
    /// Number of ghost records destroyed outright (never re-admitted).
    pub ghost_destructions: u64,
}

impl CoreCacheMetrics {
    /// Records a lookup that hit a resident list (`T1` or `T2`).
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that required `create` or `fetch`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records an eviction from a resident list to its ghost list.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records a ghost record being destroyed outright.
    pub fn record_ghost_destruction(&mut self) {
        self.ghost_destructions += 1;
    }

    /// Calculates the overall hit rate, or `0.0` with no requests yet.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert(
            "ghost_destructions".to_string(),
            self.ghost_destructions as f64,
        );
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics
    }
}

/// Trait implemented by cache types that expose metrics for reporting.
///
/// Uses `BTreeMap` rather than a `HashMap` so that two runs over the same
/// workload produce metrics output in the same key order.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// A static identifier for the algorithm, e.g. `"ARC"`.
    fn algorithm_name(&self) -> &'static str;
}

/// Metrics specific to the ARC algorithm, layered over [`CoreCacheMetrics`].
#[derive(Debug, Default, Clone)]
pub struct ArcCacheMetrics {
    core: CoreCacheMetrics,
    /// Number of lookups that hit a ghost entry in `B1` (recency ghost).
    pub b1_ghost_hits: u64,
    /// Number of lookups that hit a ghost entry in `B2` (frequency ghost).
    pub b2_ghost_hits: u64,
    /// Number of times `p` was raised (on a `B1` ghost hit).
    pub p_increases: u64,
    /// Number of times `p` was lowered (on a `B2` ghost hit).
    pub p_decreases: u64,
    /// Number of `ArcOps::fetch` failures encountered while re-admitting a
    /// ghost record.
    pub fetch_failures: u64,
}

impl ArcCacheMetrics {
    /// Creates a fresh, zeroed metrics instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that hit a resident list (`T1` or `T2`).
    pub fn record_resident_hit(&mut self) {
        self.core.record_hit();
    }

    /// Records a lookup that created a genuinely new object.
    pub fn record_miss(&mut self) {
        self.core.record_miss();
    }

    /// Records a `B1` ghost hit and the resulting rise in `p`.
    pub fn record_b1_ghost_hit(&mut self) {
        self.core.record_miss();
        self.b1_ghost_hits += 1;
        self.p_increases += 1;
    }

    /// Records a `B2` ghost hit and the resulting fall in `p`.
    pub fn record_b2_ghost_hit(&mut self) {
        self.core.record_miss();
        self.b2_ghost_hits += 1;
        self.p_decreases += 1;
    }

    /// Records an eviction from a resident list to its ghost list.
    pub fn record_eviction(&mut self) {
        self.core.record_eviction();
    }

    /// Records a ghost record being destroyed outright.
    pub fn record_ghost_destruction(&mut self) {
        self.core.record_ghost_destruction();
    }

    /// Records a fetch failure while re-admitting a ghost record.
    pub fn record_fetch_failure(&mut self) {
        self.fetch_failures += 1;
    }
}

impl CacheMetrics for ArcCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("b1_ghost_hits".to_string(), self.b1_ghost_hits as f64);
        metrics.insert("b2_ghost_hits".to_string(), self.b2_ghost_hits as f64);
        metrics.insert("fetch_failures".to_string(), self.fetch_failures as f64);
        metrics.insert("p_decreases".to_string(), self.p_decreases as f64);
        metrics.insert("p_increases".to_string(), self.p_increases as f64);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        "ARC"
    }
}
