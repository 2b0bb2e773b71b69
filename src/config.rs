//! Configuration for the Adaptive Replacement Cache.

use core::fmt;
use core::num::NonZeroU64;

/// Configuration for an [`ArcCache`](crate::ArcCache).
///
/// The only required parameter is `c`, the total capacity shared between
/// the four internal lists. The adaptive target `p` is not configurable: it
/// starts at `c / 2` and is tuned automatically by the cache as described
/// by the balance algorithm.
///
/// # Examples
///
/// ```
/// use arc_cache::config::ArcCacheConfig;
/// use core::num::NonZeroU64;
///
/// let config = ArcCacheConfig::new(NonZeroU64::new(100).unwrap());
/// assert_eq!(config.capacity(), NonZeroU64::new(100).unwrap());
/// ```
#[derive(Clone, Copy)]
pub struct ArcCacheConfig {
    /// Total capacity `c` shared between `T1` and `T2`.
    capacity: NonZeroU64,
}

impl ArcCacheConfig {
    /// Creates a new configuration for an ARC cache with the given capacity.
    pub fn new(capacity: NonZeroU64) -> Self {
        Self { capacity }
    }

    /// Returns the configured capacity `c`.
    pub fn capacity(&self) -> NonZeroU64 {
        self.capacity
    }
}

impl fmt::Debug for ArcCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArcCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_creation() {
        let config = ArcCacheConfig::new(NonZeroU64::new(4).unwrap());
        assert_eq!(config.capacity().get(), 4);
    }
}
