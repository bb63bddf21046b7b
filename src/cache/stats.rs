//! Cache observability counters.

use serde::{Deserialize, Serialize};

/// Counters exposed by a [`TransitionCache`](crate::cache::TransitionCache).
///
/// Expired entries discovered on lookup count as both a miss and an
/// expiration; capacity evictions count separately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStatistics {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
}

impl CacheStatistics {
    /// Fraction of lookups that hit, `0.0` when nothing was looked up.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_ratio_of_empty_stats_is_zero() {
        assert_eq!(CacheStatistics::default().hit_ratio(), 0.0);
    }

    #[test]
    fn hit_ratio_reflects_hits_over_lookups() {
        let stats = CacheStatistics {
            hits: 3,
            misses: 1,
            ..CacheStatistics::default()
        };
        assert_eq!(stats.hit_ratio(), 0.75);
    }
}
