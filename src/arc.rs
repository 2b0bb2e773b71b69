//! Adaptive Replacement Cache: the four-list, self-tuning replacement core.
//!
//! ARC keeps two resident lists and two ghost (history-only) lists:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                         ArcCache<K, P>                               │
//! │                                                                      │
//! │   B1 (ghost)        T1 (resident)  │  T2 (resident)       B2 (ghost) │
//! │  ◀── evicted            seen            seen at      evicted ──▶    │
//! │      from T1            once          least twice      from T2      │
//! │                                                                      │
//! │           ◀──────────────────── p ────────────────────▶             │
//! │                    (adaptive target size of T1)                     │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `T1 ∪ T2` holds at most `c` units of resident weight; `p` is the portion
//! of that budget ARC currently wants to give to recency (`T1`) rather than
//! frequency (`T2`). Every lookup that lands in a ghost list is evidence
//! that the split was wrong in one direction, and nudges `p` the other way.
//!
//! # When to use ARC
//!
//! **Good for:** workloads that mix one-shot scans with a genuinely hot
//! working set, where neither pure LRU (vulnerable to scans) nor pure LFU
//! (slow to adapt when popularity shifts) behaves well, and where you would
//! otherwise have to hand-tune a fixed split between recency and frequency.
//!
//! **Not ideal for:** workloads with a stable, already-known popularity
//! distribution (a plain LFU policy is cheaper to reason about) or ones
//! where the cost of four lists' worth of ghost bookkeeping isn't worth
//! paying over a simpler plain-LRU policy.
//!
//! # Example
//!
//! ```
//! use arc_cache::arc::ArcCache;
//! use arc_cache::config::ArcCacheConfig;
//! use arc_cache::ops::ArcOps;
//! use core::num::NonZeroU64;
//!
//! struct Store;
//!
//! impl ArcOps<u64, alloc::string::String> for Store {
//!     fn create(&mut self, _key: &u64) -> Option<u64> {
//!         Some(1)
//!     }
//!     fn fetch(&mut self, key: &u64) -> Option<alloc::string::String> {
//!         Some(alloc::string::ToString::to_string(key))
//!     }
//!     fn evict(&mut self, _key: &u64, _payload: alloc::string::String) {}
//!     fn destroy(&mut self, _key: &u64) {}
//! }
//! # extern crate alloc;
//!
//! let mut cache = ArcCache::new(Store, ArcCacheConfig::new(NonZeroU64::new(4).unwrap()));
//! assert_eq!(cache.lookup(1).unwrap().as_str(), "1");
//! assert_eq!(cache.lookup(1).unwrap().as_str(), "1"); // now in T2
//! ```

extern crate alloc;

use alloc::boxed::Box;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
extern crate std;
#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

use crate::config::ArcCacheConfig;
use crate::list::{Entry, List};
use crate::metrics::ArcCacheMetrics;
use crate::ops::{ArcError, ArcOps};
use crate::record::Record;
use crate::region::Region;

/// One of the four lists plus its running `size` (sum of resident
/// `Record::size` fields, in the host's abstract units — not entry count).
///
/// The underlying [`List`] is given an effectively unbounded entry-count
/// capacity: ARC bounds its lists by size via `ArcCache::balance`, not by
/// how many entries `list::List` itself will hold.
struct RegionList<K, P> {
    list: List<Record<K, P>>,
    size: u64,
}

impl<K, P> RegionList<K, P> {
    fn new() -> Self {
        RegionList {
            list: List::new(NonZeroUsize::MAX),
            size: 0,
        }
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Pointer to the LRU (tail) entry without detaching it, or null if
    /// this list is empty.
    fn peek_last(&self) -> *mut Entry<Record<K, P>> {
        self.list.peek_last()
    }

    /// Relinks a detached node at this list's head, accounting `size` in.
    ///
    /// # Safety
    ///
    /// `node` must be a detached, non-sigil entry not currently linked into
    /// any list, originally produced by this crate's own `List`/`Entry`
    /// machinery.
    unsafe fn adopt(&mut self, node: *mut Entry<Record<K, P>>, size: u64) {
        // SAFETY: forwarded from the caller's precondition.
        unsafe { self.list.attach_from_other_list(node) };
        self.size += size;
    }

    /// Detaches and returns the LRU (tail) entry, decrementing `size`.
    fn remove_last(&mut self) -> Option<Box<Entry<Record<K, P>>>> {
        let boxed = self.list.remove_last()?;
        // SAFETY: boxed was just detached, its value is still initialized.
        let size = unsafe { boxed.get_value().size() };
        self.size -= size;
        Some(boxed)
    }

    /// Detaches the given node, decrementing `size`.
    ///
    /// # Safety
    ///
    /// `node` must point to a live, non-sigil entry currently linked into
    /// this list.
    unsafe fn remove(
        &mut self,
        node: *mut Entry<Record<K, P>>,
    ) -> Option<Box<Entry<Record<K, P>>>> {
        // SAFETY: forwarded from the caller's precondition.
        let boxed = unsafe { self.list.remove(node) }?;
        // SAFETY: boxed was just detached, its value is still initialized.
        let size = unsafe { boxed.get_value().size() };
        self.size -= size;
        Some(boxed)
    }
}

/// Where a record came from going into [`ArcCache::transition`]: either it
/// was just created by `ArcOps::create` and has never been linked into any
/// list, or it is already linked into one of the four regions.
enum Origin<K, P> {
    /// A freshly created record, not yet indexed or linked anywhere. Has no
    /// payload yet; `transition` fetches one as part of admitting it.
    Fresh(Record<K, P>),
    /// An existing record currently linked into `region`.
    Existing {
        node: *mut Entry<Record<K, P>>,
        region: Region,
    },
}

/// An in-memory Adaptive Replacement Cache.
///
/// `ArcCache` is the cache container of the design: the four lists (`T1`,
/// `T2`, `B1`, `B2`), the adaptive target `p`, the capacity `c`, the key
/// index, and the host's [`ArcOps`] callback bundle. [`ArcCache::lookup`] is
/// the only data-path operation; everything else is introspection.
///
/// # Type parameters
///
/// - `K`: key type, `Hash + Eq + Clone` (cloned once per record, into the
///   index and into the record itself, matching every other cache in this
///   crate).
/// - `P`: payload type, entirely opaque to the cache.
/// - `O`: the host's [`ArcOps<K, P>`] implementation.
/// - `S`: hash builder, defaulted like every other cache here.
///
/// # Safety
///
/// `ArcCache` holds raw pointers from `index` into the four `RegionList`s'
/// nodes. These pointers are valid exactly as long as the node has not been
/// removed from its list and the cache itself has not been dropped; all
/// mutation happens through `&mut self`, so there is no aliasing across
/// threads to worry about (see the crate-level single-threaded contract).
pub struct ArcCache<K: Hash + Eq, P, O: ArcOps<K, P>, S = DefaultHashBuilder> {
    config: ArcCacheConfig,
    p: u64,
    t1: RegionList<K, P>,
    t2: RegionList<K, P>,
    b1: RegionList<K, P>,
    b2: RegionList<K, P>,
    index: HashMap<K, (*mut Entry<Record<K, P>>, Region), S>,
    ops: O,
    metrics: ArcCacheMetrics,
    #[cfg(debug_assertions)]
    busy: bool,
}

impl<K: Hash + Eq + Clone, P, O: ArcOps<K, P>> ArcCache<K, P, O, DefaultHashBuilder> {
    /// Creates a new, empty ARC cache with the default hash builder.
    ///
    /// `p` starts at `config.capacity() / 2`, per spec.
    pub fn new(ops: O, config: ArcCacheConfig) -> Self {
        Self::with_hasher(ops, config, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq + Clone, P, O: ArcOps<K, P>, S: BuildHasher> ArcCache<K, P, O, S> {
    /// Creates a new, empty ARC cache with an explicit hash builder.
    pub fn with_hasher(ops: O, config: ArcCacheConfig, hash_builder: S) -> Self {
        let c = config.capacity().get();
        ArcCache {
            config,
            p: c / 2,
            t1: RegionList::new(),
            t2: RegionList::new(),
            b1: RegionList::new(),
            b2: RegionList::new(),
            index: HashMap::with_hasher(hash_builder),
            ops,
            metrics: ArcCacheMetrics::new(),
            #[cfg(debug_assertions)]
            busy: false,
        }
    }

    /// The configured capacity `c`.
    pub fn capacity(&self) -> u64 {
        self.config.capacity().get()
    }

    /// The current adaptive target `p`, `0 <= p <= c`.
    pub fn p(&self) -> u64 {
        self.p
    }

    /// Number of records tracked across all four lists (resident + ghost).
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True if no records are tracked at all.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of entries currently resident in `T1`.
    pub fn t1_len(&self) -> usize {
        self.t1.len()
    }

    /// Number of entries currently resident in `T2`.
    pub fn t2_len(&self) -> usize {
        self.t2.len()
    }

    /// Number of ghost entries currently tracked in `B1`.
    pub fn b1_len(&self) -> usize {
        self.b1.len()
    }

    /// Number of ghost entries currently tracked in `B2`.
    pub fn b2_len(&self) -> usize {
        self.b2.len()
    }

    /// Total resident weight, `T1.size + T2.size`.
    pub fn resident_size(&self) -> u64 {
        self.t1.size + self.t2.size
    }

    /// Total ghost weight, `B1.size + B2.size`.
    pub fn ghost_size(&self) -> u64 {
        self.b1.size + self.b2.size
    }

    /// Metrics accumulated over this cache's lifetime.
    pub fn metrics(&self) -> &ArcCacheMetrics {
        &self.metrics
    }

    fn region_list_mut(&mut self, region: Region) -> &mut RegionList<K, P> {
        match region {
            Region::T1 => &mut self.t1,
            Region::T2 => &mut self.t2,
            Region::B1 => &mut self.b1,
            Region::B2 => &mut self.b2,
        }
    }

    /// Returns a read-only view of the payload for `key`, without affecting
    /// list membership, recency order, or `p`.
    ///
    /// Unlike [`ArcCache::lookup`], a `peek` is not a data-path operation:
    /// it never creates, fetches, evicts, or destroys anything. It exists so
    /// callers (and this crate's own invariant tests) can inspect state
    /// without perturbing it.
    pub fn peek(&self, key: &K) -> Option<&P> {
        let (node, region) = self.index.get(key)?;
        if !region.is_resident() {
            return None;
        }
        // SAFETY: node is a live pointer owned by one of our region lists.
        let record = unsafe { (**node).get_value() };
        record.payload()
    }

    /// Returns which region currently holds `key`, if tracked at all
    /// (resident or ghost).
    pub fn region_of(&self, key: &K) -> Option<Region> {
        self.index.get(key).map(|&(_, region)| region)
    }

    /// The core data-path operation: looks up `key`, creating, fetching,
    /// promoting, or ghost-tuning as described by the four-list policy.
    ///
    /// Returns a mutable reference to the resident payload on success, or
    /// an [`ArcError`] if the host's `create` or `fetch` callback failed.
    pub fn lookup(&mut self, key: K) -> Result<&mut P, ArcError> {
        #[cfg(debug_assertions)]
        {
            debug_assert!(!self.busy, "an ArcOps callback re-entered this cache");
            self.busy = true;
        }
        let result = self.lookup_inner(key);
        #[cfg(debug_assertions)]
        {
            self.busy = false;
        }
        result
    }

    fn lookup_inner(&mut self, key: K) -> Result<&mut P, ArcError> {
        let found = self.index.get(&key).copied();
        let node = match found {
            None => {
                let size = self.ops.create(&key).ok_or(ArcError::CreateFailed)?;
                let record = Record::new_empty(key.clone(), size);
                self.metrics.record_miss();
                self.transition(&key, Origin::Fresh(record), Some(Region::T1))?
                    .expect("admitting into T1 cannot destroy the record")
            }
            Some((node, region)) => match region {
                Region::T1 | Region::T2 => {
                    self.metrics.record_resident_hit();
                    self.transition(&key, Origin::Existing { node, region }, Some(Region::T2))?
                        .expect("T1/T2 -> T2 reorder cannot destroy the record")
                }
                Region::B1 => {
                    let ratio = checked_floor_div(self.b2.size, self.b1.size);
                    self.p = (self.p + ratio.max(1)).min(self.capacity());
                    self.metrics.record_b1_ghost_hit();
                    match self.transition(&key, Origin::Existing { node, region }, Some(Region::T2)) {
                        Ok(node) => node.expect("B1 -> T2 promotion cannot destroy the record"),
                        Err(e) => {
                            self.metrics.record_fetch_failure();
                            return Err(e);
                        }
                    }
                }
                Region::B2 => {
                    let ratio = checked_floor_div(self.b1.size, self.b2.size);
                    self.p = self.p.saturating_sub(ratio.max(1));
                    self.metrics.record_b2_ghost_hit();
                    match self.transition(&key, Origin::Existing { node, region }, Some(Region::T2)) {
                        Ok(node) => node.expect("B2 -> T2 promotion cannot destroy the record"),
                        Err(e) => {
                            self.metrics.record_fetch_failure();
                            return Err(e);
                        }
                    }
                }
            },
        };
        // SAFETY: node was just linked by `transition` and is live.
        let record = unsafe { (*node).get_value_mut() };
        Ok(record.payload_mut().expect("residents always carry a payload"))
    }

    /// The single chokepoint where list membership changes: `§4.3` of the
    /// design. `target = None` destroys the record outright; otherwise the
    /// record ends up linked at the head of `target`, and the key index is
    /// updated (or, on `target = None`, removed) to match.
    ///
    /// Returns the record's new node pointer (`None` only when `target` was
    /// `None`, i.e. the record was destroyed), or an [`ArcError`] if an
    /// admission's `fetch` callback failed — in which case the record is
    /// restored to wherever it came from (its original region for
    /// `Origin::Existing`, simply dropped for `Origin::Fresh`) and the index
    /// is left exactly as it was before the call.
    fn transition(
        &mut self,
        key: &K,
        origin: Origin<K, P>,
        target: Option<Region>,
    ) -> Result<Option<*mut Entry<Record<K, P>>>, ArcError> {
        // Step 1: if currently linked, unlink and decrement that list's size.
        let (node, prior_region) = match origin {
            Origin::Fresh(record) => {
                let boxed = Box::new(Entry::new(record));
                (Box::into_raw(boxed), None)
            }
            Origin::Existing { node, region } => {
                // SAFETY: caller's contract on `Origin::Existing` guarantees
                // `node` is live and linked into `region`.
                let boxed = unsafe { self.region_list_mut(region).remove(node) }
                    .expect("Origin::Existing must name a node linked into `region`");
                (Box::into_raw(boxed), Some(region))
            }
        };

        match target {
            None => {
                // Step 2: destroy outright.
                self.index.remove(key);
                if matches!(prior_region, Some(r) if r.is_ghost()) {
                    self.metrics.record_ghost_destruction();
                }
                // SAFETY: node was just detached (or never linked) and is a
                // live, non-sigil, uniquely-owned entry.
                let record = unsafe { Box::from_raw(node).into_value() };
                debug_assert!(
                    record.payload().is_none(),
                    "destroying a record that still carries a payload"
                );
                self.ops.destroy(key);
                Ok(None)
            }
            Some(target_region) if target_region.is_ghost() => {
                // Step 3: evict to a ghost list. No rebalance needed: total
                // resident weight can only shrink.
                // SAFETY: node is live, detached, non-sigil.
                let record = unsafe { (*node).get_value_mut() };
                let payload = record
                    .take_payload()
                    .expect("evicting a record with no payload");
                self.ops.evict(key, payload);
                self.metrics.record_eviction();
                let size = record.size();
                // SAFETY: node is detached and exclusively owned until adopted.
                unsafe { self.region_list_mut(target_region).adopt(node, size) };
                self.index.insert(key.clone(), (node, target_region));
                Ok(Some(node))
            }
            Some(target_region) => {
                // target_region is T1 or T2: admitting (from NONE or a
                // ghost) or reordering (from T1/T2, already resident).
                let was_resident = matches!(prior_region, Some(r) if r.is_resident());
                if !was_resident {
                    // Step 4: admission. Make room, then fetch.
                    // SAFETY: node is live; size never changes post-creation.
                    let size = unsafe { (*node).get_value().size() };
                    self.balance(size);
                    match self.ops.fetch(key) {
                        Some(payload) => {
                            // SAFETY: node is still live; nothing else
                            // could have touched it during `balance`/`fetch`.
                            unsafe { (*node).get_value_mut() }.payload = Some(payload);
                        }
                        None => {
                            return match prior_region {
                                // Fresh record: nothing to restore to, drop it.
                                None => {
                                    // SAFETY: node was never linked anywhere.
                                    let _ = unsafe { Box::from_raw(node).into_value() };
                                    Err(ArcError::FetchFailed)
                                }
                                // Existing ghost: restore it where it came from.
                                Some(region) => {
                                    // SAFETY: node is detached and exclusively
                                    // owned until restored below.
                                    unsafe { self.region_list_mut(region).adopt(node, size) };
                                    self.index.insert(key.clone(), (node, region));
                                    Err(ArcError::FetchFailed)
                                }
                            };
                        }
                    }
                }
                // Step 5: link at the head of `target`.
                // SAFETY: node is live; size is stable.
                let size = unsafe { (*node).get_value().size() };
                // SAFETY: node is detached and exclusively owned until adopted.
                unsafe { self.region_list_mut(target_region).adopt(node, size) };
                self.index.insert(key.clone(), (node, target_region));
                Ok(Some(node))
            }
        }
    }

    /// Restores the size invariants to admit `incoming_size` fresh weight:
    /// `§4.4` of the design, phases 1 (trim residents into ghosts) and 2
    /// (trim ghosts outright).
    fn balance(&mut self, incoming_size: u64) {
        let c = self.capacity();

        while self.t1.size + self.t2.size + incoming_size > c {
            let (from, to) = if self.t1.size > self.p {
                (Region::T1, Region::B1)
            } else if self.t2.size > 0 {
                (Region::T2, Region::B2)
            } else {
                break;
            };
            let node = self.region_list_mut(from).peek_last();
            if node.is_null() {
                break;
            }
            // SAFETY: node is live and owned by `from`'s list.
            let key = unsafe { (*node).get_value().key() }.clone();
            let outcome = self.transition(&key, Origin::Existing { node, region: from }, Some(to));
            debug_assert!(outcome.is_ok(), "evicting to a ghost list cannot fail");
        }

        while self.b1.size + self.b2.size > c {
            let from = if self.b2.size > self.p {
                Region::B2
            } else if self.b1.size > 0 {
                Region::B1
            } else {
                break;
            };
            let node = self.region_list_mut(from).peek_last();
            if node.is_null() {
                break;
            }
            // SAFETY: node is live and owned by `from`'s list.
            let key = unsafe { (*node).get_value().key() }.clone();
            let outcome = self.transition(&key, Origin::Existing { node, region: from }, None);
            debug_assert!(outcome.is_ok(), "destroying a ghost record cannot fail");
        }
    }
}

impl<K: Hash + Eq, P, O: ArcOps<K, P>, S> Drop for ArcCache<K, P, O, S> {
    /// Destroys every resident and ghost record, evicting live payloads
    /// first. Pops each list head-first rather than iterating while
    /// mutating it — `original_source/src/arc.c`'s `arc_destroy` does the
    /// latter, which spec.md §9 calls out as a latent defect not worth
    /// reproducing.
    fn drop(&mut self) {
        for region_list in [&mut self.t1, &mut self.t2, &mut self.b1, &mut self.b2] {
            while let Some(boxed) = region_list.remove_last() {
                // SAFETY: boxed is detached and uniquely owned here.
                let mut record = unsafe { boxed.into_value() };
                if let Some(payload) = record.take_payload() {
                    self.ops.evict(record.key(), payload);
                }
                self.ops.destroy(record.key());
            }
        }
    }
}

fn checked_floor_div(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        0
    } else {
        numerator / denominator
    }
}
