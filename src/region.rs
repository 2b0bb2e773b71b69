//! The four-way tag that records which list an object currently belongs to.

/// Which of the four ARC lists an object currently lives in.
///
/// `T1` and `T2` hold resident objects (recency-resident and
/// frequency-resident respectively); `B1` and `B2` hold ghost entries
/// (history only, no payload) evicted from `T1` and `T2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Recency list: objects seen once recently, resident.
    T1,
    /// Frequency list: objects seen more than once, resident.
    T2,
    /// Recency ghost list: history of objects evicted from `T1`.
    B1,
    /// Frequency ghost list: history of objects evicted from `T2`.
    B2,
}

impl Region {
    /// True for the two resident lists (`T1`, `T2`).
    pub fn is_resident(self) -> bool {
        matches!(self, Region::T1 | Region::T2)
    }

    /// True for the two ghost lists (`B1`, `B2`).
    pub fn is_ghost(self) -> bool {
        matches!(self, Region::B1 | Region::B2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resident_and_ghost_are_disjoint() {
        for r in [Region::T1, Region::T2, Region::B1, Region::B2] {
            assert_ne!(r.is_resident(), r.is_ghost());
        }
    }

    #[test]
    fn t1_t2_are_resident() {
        assert!(Region::T1.is_resident());
        assert!(Region::T2.is_resident());
        assert!(!Region::B1.is_resident());
        assert!(!Region::B2.is_resident());
    }

    #[test]
    fn b1_b2_are_ghost() {
        assert!(Region::B1.is_ghost());
        assert!(Region::B2.is_ghost());
        assert!(!Region::T1.is_ghost());
        assert!(!Region::T2.is_ghost());
    }
}
