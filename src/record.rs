//! The object record tracked by each list node.
//!
//! An object record holds the key that identifies it, its size (in whatever
//! abstract unit the host chooses), and its payload slot. A resident record
//! (`T1`/`T2`) always has `payload == Some(_)`; a ghost record (`B1`/`B2`)
//! always has `payload == None`. During the brief window inside
//! [`crate::arc::ArcCache::transition`] between a resident object being
//! evicted to a ghost list and the ghost record being installed, the payload
//! has already been released but the record has not yet been relinked — that
//! window never escapes to outside callers.

/// A cached object together with its bookkeeping size and payload slot.
pub struct Record<K, P> {
    /// The key this record was created for.
    pub(crate) key: K,
    /// Abstract size used for capacity accounting (bytes, weight, or count).
    pub(crate) size: u64,
    /// The resident payload, or `None` for a ghost entry.
    pub(crate) payload: Option<P>,
}

impl<K, P> Record<K, P> {
    /// Creates a new resident record.
    pub(crate) fn new(key: K, size: u64, payload: P) -> Self {
        Record {
            key,
            size,
            payload: Some(payload),
        }
    }

    /// Creates a record with no payload yet: either a true ghost (`B1`/`B2`)
    /// or a record pending its first `ArcOps::fetch` on admission. `size` is
    /// fixed at creation and never changes afterwards, matching the host's
    /// `create` callback reporting it once up front.
    pub(crate) fn new_empty(key: K, size: u64) -> Self {
        Record {
            key,
            size,
            payload: None,
        }
    }

    /// Returns the record's key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the record's abstract size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns a reference to the payload, if resident.
    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Returns a mutable reference to the payload, if resident.
    pub fn payload_mut(&mut self) -> Option<&mut P> {
        self.payload.as_mut()
    }

    /// Takes the payload out, leaving the record in ghost form.
    pub(crate) fn take_payload(&mut self) -> Option<P> {
        self.payload.take()
    }
}
