#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## How ARC Works
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Adaptive Replacement Cache                  │
//! │                                                                     │
//! │   B1 (ghost)        T1 (resident)  │  T2 (resident)      B2 (ghost) │
//! │  history of             seen            seen at       history of   │
//! │  recent evicts          once          least twice     freq evicts  │
//! │                                                                     │
//! │             ◀────────────────── p ───────────────────▶             │
//! │                   target size of T1, self-tuning                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every lookup does exactly one of four things:
//!
//! 1. **Miss** (key in none of the four lists): create + fetch it, admit to
//!    `T1`, possibly evicting to keep residents within capacity.
//! 2. **Hit in `T1` or `T2`**: promote to the head of `T2` (frequency).
//! 3. **Ghost hit in `B1`**: the cache guessed too little recency capacity
//!    was needed; raise `p`, re-fetch, admit to `T2`.
//! 4. **Ghost hit in `B2`**: the cache guessed too much; lower `p`, re-fetch,
//!    admit to `T2`.
//!
//! ## Quick Start
//!
//! ```rust
//! use arc_cache::arc::ArcCache;
//! use arc_cache::config::ArcCacheConfig;
//! use arc_cache::ops::ArcOps;
//! use core::num::NonZeroU64;
//!
//! extern crate alloc;
//! use alloc::string::{String, ToString};
//!
//! struct BackingStore;
//!
//! impl ArcOps<u64, String> for BackingStore {
//!     fn create(&mut self, _key: &u64) -> Option<u64> {
//!         Some(1) // every object costs 1 unit here
//!     }
//!     fn fetch(&mut self, key: &u64) -> Option<String> {
//!         Some(key.to_string())
//!     }
//!     fn evict(&mut self, _key: &u64, _payload: String) {}
//!     fn destroy(&mut self, _key: &u64) {}
//! }
//!
//! let mut cache = ArcCache::new(BackingStore, ArcCacheConfig::new(NonZeroU64::new(3).unwrap()));
//! cache.lookup(1).unwrap();
//! cache.lookup(2).unwrap();
//! cache.lookup(1).unwrap(); // promotes 1 to T2, out of eviction's way
//! cache.lookup(3).unwrap();
//! cache.lookup(4).unwrap(); // evicts 2 (T1's LRU) into B1; 1 stays put in T2
//! assert_eq!(cache.peek(&1), Some(&"1".to_string()));
//! assert_eq!(cache.peek(&2), None);
//! ```
//!
//! ## Introspection
//!
//! `ArcCache` exposes read-only accessors for every quantity the algorithm
//! itself reasons about, so tests and diagnostics can assert on internal
//! state without reaching into private fields:
//!
//! ```rust
//! # use arc_cache::arc::ArcCache;
//! # use arc_cache::config::ArcCacheConfig;
//! # use arc_cache::ops::ArcOps;
//! # use core::num::NonZeroU64;
//! # struct NoOp;
//! # impl ArcOps<u64, u64> for NoOp {
//! #     fn create(&mut self, _key: &u64) -> Option<u64> { Some(1) }
//! #     fn fetch(&mut self, key: &u64) -> Option<u64> { Some(*key) }
//! #     fn evict(&mut self, _key: &u64, _payload: u64) {}
//! #     fn destroy(&mut self, _key: &u64) {}
//! # }
//! let mut cache = ArcCache::new(NoOp, ArcCacheConfig::new(NonZeroU64::new(4).unwrap()));
//! cache.lookup(1).unwrap();
//! assert_eq!(cache.t1_len() + cache.t2_len(), cache.len());
//! assert!(cache.p() <= cache.capacity());
//! ```
//!
//! ## Modules
//!
//! - [`arc`]: the `ArcCache` container and the `transition`/`balance` core
//! - [`ops`]: the `ArcOps` host callback trait and `ArcError`
//! - [`region`]: the `Region` list-membership tag
//! - [`record`]: the per-object `Record` tracked by each list node
//! - [`config`]: `ArcCacheConfig`
//! - [`metrics`]: `ArcCacheMetrics` and the shared `CacheMetrics` trait

#![no_std]

/// Intrusive doubly linked list with in-place editing, shared by every
/// list ARC maintains (`T1`, `T2`, `B1`, `B2`).
///
/// **Note**: internal infrastructure, not exposed to consumers. Exposes
/// unsafe raw-pointer operations that require careful invariant maintenance.
pub(crate) mod list;

/// Cache configuration.
pub mod config;

/// The host-supplied capability bundle (`ArcOps`) and the core's error
/// taxonomy (`ArcError`).
pub mod ops;

/// The four-way list-membership tag (`Region`).
pub mod region;

/// The per-object record each list node carries.
pub mod record;

/// Cache metrics.
pub mod metrics;

/// The Adaptive Replacement Cache container and algorithm.
pub mod arc;

pub use arc::ArcCache;
pub use config::ArcCacheConfig;
pub use metrics::{ArcCacheMetrics, CacheMetrics};
pub use ops::{ArcError, ArcOps};
pub use region::Region;
