//! The host-supplied capability bundle and the core's error taxonomy.

use core::fmt;

/// Operations the cache core delegates to its host.
///
/// An implementation of `ArcOps` is the only way the core ever touches a
/// payload: it never fabricates one. All four lifecycle callbacks
/// (`create`, `fetch`, `evict`, `destroy`) are invoked synchronously from
/// inside [`crate::arc::ArcCache::lookup`]; none of them may call back into
/// the same `ArcCache` instance. Doing so is undefined behavior the core
/// cannot detect — see the crate-level safety notes.
///
/// `create` and `fetch` are deliberately separate, matching
/// `original_source/src/arc.c`: `create` only has to know a new key's
/// *size* up front (the C reference's `arc_object_init(obj, size)`);
/// `fetch` is what actually produces the payload, and runs for every
/// admission into `T1`/`T2` — a brand new key right after `create`
/// succeeds, or a ghost key being promoted back to residency. A payload
/// is never carried over from a ghost hit; it is always re-fetched.
pub trait ArcOps<K, P> {
    /// Reports the size of a key that is not currently tracked by the cache
    /// (a true miss), without yet producing its payload. Returning `None`
    /// fails the lookup with [`ArcError::CreateFailed`] and leaves no trace
    /// of the key behind.
    fn create(&mut self, key: &K) -> Option<u64>;

    /// Produces (or re-produces) the payload for a key being admitted into
    /// `T1` or `T2`: either a brand new key right after `create` succeeded,
    /// or a key whose record survives only as a ghost (`B1`/`B2`) being
    /// promoted back to residency. Returning `None` fails the lookup with
    /// [`ArcError::FetchFailed`]; for a ghost promotion the record is
    /// restored to the ghost list it came from, as if the lookup had not
    /// happened; for a brand new key, no trace of it is left behind.
    fn fetch(&mut self, key: &K) -> Option<P>;

    /// Called when a resident payload is evicted to a ghost list. The
    /// payload is moved out of the record and handed here for release;
    /// after this call the record carries no payload until it is either
    /// destroyed or re-fetched.
    fn evict(&mut self, key: &K, payload: P);

    /// Called when a record (resident or ghost) leaves the cache for good.
    fn destroy(&mut self, key: &K);
}

/// Failure modes the core can report back to the caller of `lookup`.
///
/// Every other failure path described in the surrounding design — a record
/// discovered with no list membership, or a host callback re-entering the
/// cache — is a programming error, not a recoverable condition, and is
/// reported with a `debug_assert!`-gated panic instead of a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcError {
    /// `ArcOps::create` returned `None` for a key with no existing record.
    CreateFailed,
    /// `ArcOps::fetch` returned `None` for a key found in a ghost list.
    FetchFailed,
}

impl fmt::Display for ArcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArcError::CreateFailed => write!(f, "host failed to create object for new key"),
            ArcError::FetchFailed => write!(f, "host failed to fetch object for ghost key"),
        }
    }
}

#[cfg(feature = "std")]
mod std_error {
    extern crate std;
    use super::ArcError;

    impl std::error::Error for ArcError {}
}
