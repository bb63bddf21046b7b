//! Eviction strategies.

use super::{CacheEntry, CacheKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Policy for choosing a victim when the cache is full.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheStrategy {
    /// Evict the least recently used entry.
    #[default]
    Lru,
    /// Evict the least frequently used entry (ties broken by recency).
    Lfu,
    /// Evict the oldest inserted entry.
    Fifo,
    /// Evict an expired entry if one exists, otherwise the oldest.
    Ttl,
}

/// Pick the entry to evict under `strategy`.
///
/// Selection keys on monotonic sequence numbers rather than timestamps,
/// so the choice is deterministic even when entries share a clock tick.
pub(crate) fn select_victim<T>(
    strategy: CacheStrategy,
    entries: &HashMap<CacheKey, CacheEntry<T>>,
    now: DateTime<Utc>,
) -> Option<CacheKey> {
    match strategy {
        CacheStrategy::Lru => entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used_seq)
            .map(|(key, _)| key.clone()),
        CacheStrategy::Lfu => entries
            .iter()
            .min_by_key(|(_, entry)| (entry.access_count, entry.last_used_seq))
            .map(|(key, _)| key.clone()),
        CacheStrategy::Fifo => entries
            .iter()
            .min_by_key(|(_, entry)| entry.inserted_seq)
            .map(|(key, _)| key.clone()),
        CacheStrategy::Ttl => entries
            .iter()
            .min_by_key(|(_, entry)| (!entry.is_expired(now), entry.inserted_seq))
            .map(|(key, _)| key.clone()),
    }
}
