//! Transition cache.
//!
//! A bounded, strategy-driven cache for computed transition results,
//! consumed by the traversal layer and by callers that derive expensive
//! values from `(state, symbol)` pairs. Keys are explicit structural
//! tuples; values are arbitrary. The cache performs no internal locking:
//! concurrent readers are only safe if insertion and eviction are
//! serialized per instance.

mod stats;
mod strategy;

pub use stats::CacheStatistics;
pub use strategy::CacheStrategy;

use crate::core::{StateId, Symbol};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Structural cache key: source state, input symbol, and an optional
/// discriminator for callers that cache more than one kind of value per
/// transition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheKey {
    pub source: StateId,
    pub symbol: Symbol,
    pub discriminator: Option<String>,
}

impl CacheKey {
    /// Key for a plain transition lookup.
    pub fn new(source: StateId, symbol: impl Into<Symbol>) -> Self {
        Self {
            source,
            symbol: symbol.into(),
            discriminator: None,
        }
    }

    /// Key with a caller-chosen discriminator.
    pub fn with_discriminator(
        source: StateId,
        symbol: impl Into<Symbol>,
        discriminator: impl Into<String>,
    ) -> Self {
        Self {
            source,
            symbol: symbol.into(),
            discriminator: Some(discriminator.into()),
        }
    }
}

/// A cached value with access bookkeeping.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub value: T,
    pub created_at: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
    pub access_count: u64,
    /// Target state recorded when the entry caches a transition.
    pub target_state: Option<StateId>,
    /// Free-form caller metadata.
    pub metadata: Option<serde_json::Value>,
    ttl: Option<Duration>,
    pub(crate) inserted_seq: u64,
    pub(crate) last_used_seq: u64,
}

impl<T> CacheEntry<T> {
    fn new(value: T, now: DateTime<Utc>, seq: u64, ttl: Option<Duration>) -> Self {
        Self {
            value,
            created_at: now,
            last_accessed: now,
            access_count: 0,
            target_state: None,
            metadata: None,
            ttl,
            inserted_seq: seq,
            last_used_seq: seq,
        }
    }

    pub(crate) fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.ttl {
            Some(ttl) => now
                .signed_duration_since(self.created_at)
                .to_std()
                .map(|elapsed| elapsed >= ttl)
                .unwrap_or(false),
            None => false,
        }
    }
}

/// Cache sizing and policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries; inserting a new key beyond this evicts
    /// a victim chosen by the strategy.
    pub capacity: usize,
    pub strategy: CacheStrategy,
    /// TTL applied to entries inserted without an explicit one.
    pub default_ttl: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            strategy: CacheStrategy::Lru,
            default_ttl: None,
        }
    }
}

/// Bounded cache for computed transition results.
///
/// # Example
///
/// ```rust
/// use quotient::{CacheConfig, CacheKey, TransitionCache};
///
/// let mut cache = TransitionCache::new(CacheConfig::default());
/// let key = CacheKey::new(1, "advance");
///
/// let value = *cache.get_or_compute(key.clone(), None, || 42u64);
/// assert_eq!(value, 42);
/// assert_eq!(cache.stats().misses, 1);
///
/// // Second lookup hits without recomputing.
/// let value = *cache.get_or_compute(key, None, || unreachable!());
/// assert_eq!(value, 42);
/// assert_eq!(cache.stats().hits, 1);
/// ```
#[derive(Clone, Debug)]
pub struct TransitionCache<T> {
    entries: HashMap<CacheKey, CacheEntry<T>>,
    config: CacheConfig,
    stats: CacheStatistics,
    seq: u64,
}

impl<T> TransitionCache<T> {
    /// Create an empty cache with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            config,
            stats: CacheStatistics::default(),
            seq: 0,
        }
    }

    /// Look up a value, updating recency and access counters on a hit.
    ///
    /// An expired entry is removed and reported as a miss.
    pub fn get(&mut self, key: &CacheKey) -> Option<&T> {
        let now = Utc::now();
        match self.entries.get(key).map(|entry| entry.is_expired(now)) {
            None => {
                self.stats.misses += 1;
                None
            }
            Some(true) => {
                self.entries.remove(key);
                self.stats.misses += 1;
                self.stats.expirations += 1;
                tracing::debug!("Cache entry expired for state {} on '{}'", key.source, key.symbol);
                None
            }
            Some(false) => {
                self.seq += 1;
                let seq = self.seq;
                let entry = self.entries.get_mut(key)?;
                entry.last_accessed = now;
                entry.last_used_seq = seq;
                entry.access_count += 1;
                self.stats.hits += 1;
                Some(&entry.value)
            }
        }
    }

    /// Insert a value under the configured default TTL.
    pub fn insert(&mut self, key: CacheKey, value: T) {
        let ttl = self.config.default_ttl;
        self.insert_entry(key, value, None, None, ttl);
    }

    /// Insert a value with an explicit TTL (`None` disables expiry for
    /// this entry regardless of the default).
    pub fn insert_with_ttl(&mut self, key: CacheKey, value: T, ttl: Option<Duration>) {
        self.insert_entry(key, value, None, None, ttl);
    }

    /// Insert a value recording the transition target it was derived
    /// from.
    pub fn insert_for_transition(&mut self, key: CacheKey, value: T, target: StateId) {
        let ttl = self.config.default_ttl;
        self.insert_entry(key, value, Some(target), None, ttl);
    }

    /// Insert a value with caller metadata attached.
    pub fn insert_with_metadata(&mut self, key: CacheKey, value: T, metadata: serde_json::Value) {
        let ttl = self.config.default_ttl;
        self.insert_entry(key, value, None, Some(metadata), ttl);
    }

    fn insert_entry(
        &mut self,
        key: CacheKey,
        value: T,
        target_state: Option<StateId>,
        metadata: Option<serde_json::Value>,
        ttl: Option<Duration>,
    ) {
        let now = Utc::now();
        self.make_room_for(&key, now);
        self.seq += 1;
        let mut entry = CacheEntry::new(value, now, self.seq, ttl);
        entry.target_state = target_state;
        entry.metadata = metadata;
        self.entries.insert(key, entry);
    }

    /// Return the cached value for `key`, computing and inserting it on a
    /// miss. The computation runs at most once per live entry.
    pub fn get_or_compute<F>(&mut self, key: CacheKey, ttl: Option<Duration>, compute: F) -> &T
    where
        F: FnOnce() -> T,
    {
        let now = Utc::now();
        let expired = self
            .entries
            .get(&key)
            .is_some_and(|entry| entry.is_expired(now));
        if expired {
            self.entries.remove(&key);
            self.stats.expirations += 1;
        }

        let hit = self.entries.contains_key(&key);
        if hit {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
            let value = compute();
            self.make_room_for(&key, now);
            self.seq += 1;
            let entry = CacheEntry::new(value, now, self.seq, ttl.or(self.config.default_ttl));
            self.entries.insert(key.clone(), entry);
        }

        self.seq += 1;
        let seq = self.seq;
        let entry = self
            .entries
            .get_mut(&key)
            .expect("Entry inserted or verified present above");
        if hit {
            entry.access_count += 1;
            entry.last_accessed = now;
        }
        entry.last_used_seq = seq;
        &entry.value
    }

    fn make_room_for(&mut self, key: &CacheKey, now: DateTime<Utc>) {
        if self.config.capacity == 0
            || self.entries.contains_key(key)
            || self.entries.len() < self.config.capacity
        {
            return;
        }
        if let Some(victim) = strategy::select_victim(self.config.strategy, &self.entries, now) {
            self.entries.remove(&victim);
            self.stats.evictions += 1;
            tracing::debug!(
                "Evicted cache entry for state {} on '{}'",
                victim.source,
                victim.symbol
            );
        }
    }

    /// Remove every expired entry, returning how many were dropped.
    pub fn evict_expired(&mut self) -> usize {
        let now = Utc::now();
        let expired: Vec<CacheKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            self.entries.remove(key);
        }
        self.stats.expirations += expired.len() as u64;
        expired.len()
    }

    /// Inspect an entry without touching its counters.
    pub fn entry(&self, key: &CacheKey) -> Option<&CacheEntry<T>> {
        self.entries.get(key)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries, keeping statistics.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Observability counters.
    pub fn stats(&self) -> CacheStatistics {
        self.stats
    }

    /// The active configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}
