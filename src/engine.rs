//! # Tunable Cache Engine
//!
//! A fixed-capacity key/value cache whose eviction policy and capacity can
//! be swapped at runtime. The engine owns a key index and exactly one
//! eviction strategy; every lookup is reported to a telemetry sink so an
//! external tuner can compare policies and push a new configuration.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────────┐
//!   │ TunableCache<K, V, S, T>                                          │
//!   │                                                                   │
//!   │  config: CacheConfig { id, capacity, policy }                     │
//!   │                                                                   │
//!   │  index: FxHashMap<K, SlotId> ────────┐                            │
//!   │                                      ▼                            │
//!   │  strategy: Strategy<K, V>   ┌───────────────────────────────────┐ │
//!   │                             │ Frequency (LFU): indexed min-heap │ │
//!   │                             │   or                              │ │
//!   │                             │ Recency (LRU/MRU): intrusive list │ │
//!   │                             └───────────────────────────────────┘ │
//!   │                                                                   │
//!   │  source: S ──load()──► RawConfig ──validate()──► CacheConfig      │
//!   │  sink:   T ◄──record()── one CacheRequestEvent per lookup         │
//!   └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation | Telemetry | Effect on hit | Effect on miss |
//! |-----------|-----------|---------------|----------------|
//! | `contains` | 1 event | none | none |
//! | `get` / `get_mut` | 1 event | promote, return value | none |
//! | `put` | 1 event | none (value kept) | insert, evicting one entry if full |
//! | `reconfigure` | none | reload config, drop every entry | |
//!
//! A capacity of zero turns `put` into a no-op; lookups keep working and
//! keep reporting misses.
//!
//! ## Example
//!
//! ```
//! use tunecache::config::{RawConfig, StaticConfig};
//! use tunecache::engine::TunableCache;
//! use tunecache::policy::CachePolicy;
//! use tunecache::telemetry::NoopSink;
//!
//! let source = StaticConfig::new(RawConfig::new(1, 2, "lfu"));
//! let mut cache = TunableCache::new(source, NoopSink).unwrap();
//! assert_eq!(cache.policy(), CachePolicy::LeastFrequentlyUsed);
//!
//! cache.put("a", 1);
//! cache.put("b", 2);
//! assert_eq!(cache.get(&"a"), Some(&1));
//!
//! // "b" has been read the fewest times.
//! assert_eq!(cache.put("c", 3), Some(("b", 2)));
//! assert!(!cache.contains(&"b"));
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::config::{CacheConfig, ConfigId, ConfigSource, StaticConfig};
use crate::ds::SlotId;
use crate::error::{CacheError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::EngineMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::EngineMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    EngineMetricsReadRecorder, EngineMetricsRecorder, MetricsSnapshotProvider,
};
use crate::policy::CachePolicy;
use crate::strategy::Strategy;
use crate::telemetry::{CacheRequestEvent, NoopSink, TelemetrySink};
use crate::traits::EvictionStrategy;

/// Upper bound on the slots reserved up front by a (re)configuration.
///
/// Capacities above this still work; the structures grow on demand.
pub const PREALLOC_LIMIT: usize = 4096;

/// Fixed-capacity cache with a runtime-switchable eviction policy.
pub struct TunableCache<K, V, S = StaticConfig, T = NoopSink> {
    source: S,
    sink: T,
    config: CacheConfig,
    index: FxHashMap<K, SlotId>,
    strategy: Strategy<K, V>,
    #[cfg(feature = "metrics")]
    metrics: EngineMetrics,
}

impl<K, V, S, T> TunableCache<K, V, S, T>
where
    K: Eq + Hash + Clone,
    S: ConfigSource,
    T: TelemetrySink<K>,
{
    /// Loads the initial configuration from `source`.
    pub fn new(source: S, sink: T) -> Result<Self, CacheError> {
        let config = source.load()?.validate()?;
        Ok(Self::with_config(source, sink, config))
    }

    /// Starts from an already-validated configuration. `source` is consulted
    /// only on the next `reconfigure`.
    pub fn with_config(source: S, sink: T, config: CacheConfig) -> Self {
        let prealloc = config.capacity().min(PREALLOC_LIMIT);
        Self {
            source,
            sink,
            config,
            index: FxHashMap::with_capacity_and_hasher(prealloc, Default::default()),
            strategy: Strategy::for_policy(config.policy(), prealloc),
            #[cfg(feature = "metrics")]
            metrics: EngineMetrics::default(),
        }
    }

    /// Reports whether `key` is resident. Emits one telemetry event.
    pub fn contains(&self, key: &K) -> bool {
        self.lookup(key).is_some()
    }

    /// Returns the value for `key`, applying the policy's promotion on a hit.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.get_mut(key).map(|value| &*value)
    }

    /// Like [`get`](Self::get) but lets the caller modify the value in place.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let Some(id) = self.lookup(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        self.strategy.promote(id)
    }

    /// Inserts `key` if it is not already resident.
    ///
    /// An existing entry is left exactly as it was, value included. When
    /// the cache is full one victim is evicted first and returned.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if self.lookup(&key).is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_put_existing();
            return None;
        }

        let capacity = self.config.capacity();
        if capacity == 0 {
            #[cfg(feature = "metrics")]
            self.metrics.record_put_rejected();
            return None;
        }

        let evicted = if self.index.len() >= capacity {
            self.evict_one()
        } else {
            None
        };

        let id = self.strategy.insert(key.clone(), value);
        self.index.insert(key, id);
        #[cfg(feature = "metrics")]
        self.metrics.record_put_new();
        evicted
    }

    /// Pulls a fresh configuration from the source and, if it validates,
    /// resets the cache to it. On error nothing changes.
    pub fn reconfigure(&mut self) -> Result<(), CacheError> {
        let loaded = self
            .source
            .load()
            .map_err(CacheError::from)
            .and_then(|raw| raw.validate());
        match loaded {
            Ok(config) => {
                self.apply(config);
                Ok(())
            },
            Err(err) => {
                warn!(
                    config_id = %self.config.id(),
                    error = %err,
                    "configuration rejected, keeping current cache"
                );
                #[cfg(feature = "metrics")]
                self.metrics.record_reconfigure_rejected();
                Err(err)
            },
        }
    }

    /// Drops every entry and rebuilds the index and strategy for `config`.
    pub fn apply(&mut self, config: CacheConfig) {
        let dropped = self.index.len();
        let prealloc = config.capacity().min(PREALLOC_LIMIT);
        self.index = FxHashMap::with_capacity_and_hasher(prealloc, Default::default());
        self.strategy = Strategy::for_policy(config.policy(), prealloc);
        self.config = config;
        #[cfg(feature = "metrics")]
        self.metrics.record_reconfigure();
        debug!(
            config_id = %config.id(),
            capacity = config.capacity(),
            policy = %config.policy(),
            dropped,
            "cache reconfigured"
        );
    }

    /// Access count of `key` under LFU. `None` for other policies and absent
    /// keys. Does not emit telemetry.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.strategy.frequency(id)
    }

    /// The key the next eviction would remove. Does not emit telemetry.
    pub fn peek_victim(&self) -> Option<&K> {
        self.strategy.peek_victim()
    }

    /// Verifies that the index and the active strategy agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.strategy.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but strategy holds {} entries",
                self.index.len(),
                self.strategy.len()
            )));
        }
        if self.index.len() > self.config.capacity() {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.index.len(),
                self.config.capacity()
            )));
        }
        for (key, &id) in &self.index {
            match self.strategy.key_of(id) {
                Some(stored) if stored == key => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "index handle {}:{} points at a different key",
                        id.index(),
                        id.generation()
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "index handle {}:{} is stale",
                        id.index(),
                        id.generation()
                    )));
                },
            }
        }
        self.strategy.check_invariants()
    }

    fn lookup(&self, key: &K) -> Option<SlotId> {
        let id = self.index.get(key).copied();
        self.sink.record(&CacheRequestEvent {
            config_id: self.config.id(),
            key,
            hit: id.is_some(),
        });
        #[cfg(feature = "metrics")]
        {
            (&self.metrics).record_request_call();
            if id.is_some() {
                (&self.metrics).record_request_hit();
            }
        }
        id
    }

    fn evict_one(&mut self) -> Option<(K, V)> {
        let (key, value) = self.strategy.evict()?;
        self.index.remove(&key);
        #[cfg(feature = "metrics")]
        self.metrics.record_eviction();
        trace!(
            config_id = %self.config.id(),
            policy = %self.config.policy(),
            "evicted entry"
        );
        Some((key, value))
    }
}

impl<K, V, S, T> TunableCache<K, V, S, T> {
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity()
    }

    pub fn policy(&self) -> CachePolicy {
        self.config.policy()
    }

    pub fn config_id(&self) -> ConfigId {
        self.config.id()
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &T {
        &self.sink
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S, T> TunableCache<K, V, S, T> {
    pub fn metrics_snapshot(&self) -> EngineMetricsSnapshot {
        EngineMetricsSnapshot {
            requests: self.metrics.requests.get(),
            request_hits: self.metrics.request_hits.get(),
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            put_calls: self.metrics.put_calls,
            put_new: self.metrics.put_new,
            put_existing: self.metrics.put_existing,
            put_rejected: self.metrics.put_rejected,
            evictions: self.metrics.evictions,
            reconfigurations: self.metrics.reconfigurations,
            rejected_reconfigurations: self.metrics.rejected_reconfigurations,
            cache_len: self.index.len(),
            capacity: self.config.capacity(),
            config_id: self.config.id(),
        }
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S, T> MetricsSnapshotProvider<EngineMetricsSnapshot> for TunableCache<K, V, S, T> {
    fn snapshot(&self) -> EngineMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V, S, T> fmt::Debug for TunableCache<K, V, S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TunableCache")
            .field("config_id", &self.config.id())
            .field("policy", &self.config.policy())
            .field("capacity", &self.config.capacity())
            .field("len", &self.index.len())
            .finish_non_exhaustive()
    }
}
