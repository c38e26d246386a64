//! Builder for [`TunableCache`].
//!
//! Collects an initial capacity, policy, configuration id and telemetry
//! sink, then produces a cache that starts from that configuration. Adding
//! a sink changes the builder's type, so the sink is known statically and
//! `record` calls are dispatched without a vtable.
//!
//! ## Example
//!
//! ```rust
//! use tunecache::builder::CacheBuilder;
//! use tunecache::policy::CachePolicy;
//!
//! let mut cache = CacheBuilder::new(100)
//!     .policy(CachePolicy::LeastFrequentlyUsed)
//!     .build::<u64, String>();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

use crate::config::{CacheConfig, ConfigId, ConfigSource, StaticConfig};
use crate::engine::TunableCache;
use crate::policy::CachePolicy;
use crate::telemetry::{NoopSink, TelemetrySink};

/// Builder for creating cache instances.
#[derive(Debug, Clone)]
pub struct CacheBuilder<T = NoopSink> {
    capacity: usize,
    policy: CachePolicy,
    config_id: ConfigId,
    sink: T,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    ///
    /// Defaults to [`CachePolicy::LeastRecentlyUsed`], config id 0 and no
    /// telemetry.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            policy: CachePolicy::default(),
            config_id: ConfigId::default(),
            sink: NoopSink,
        }
    }
}

impl<T> CacheBuilder<T> {
    pub fn policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn config_id(mut self, id: u64) -> Self {
        self.config_id = ConfigId(id);
        self
    }

    /// Replace the telemetry sink.
    pub fn telemetry<U>(self, sink: U) -> CacheBuilder<U> {
        CacheBuilder {
            capacity: self.capacity,
            policy: self.policy,
            config_id: self.config_id,
            sink,
        }
    }

    /// The configuration the built cache will start from.
    pub fn config(&self) -> CacheConfig {
        CacheConfig::new(self.config_id, self.capacity, self.policy)
    }

    /// Build a cache whose `reconfigure` always returns to the builder's
    /// configuration.
    pub fn build<K, V>(self) -> TunableCache<K, V, StaticConfig, T>
    where
        K: Eq + Hash + Clone,
        T: TelemetrySink<K>,
    {
        let config = self.config();
        TunableCache::with_config(StaticConfig::from(config), self.sink, config)
    }

    /// Build a cache that starts from the builder's configuration and pulls
    /// later ones from `source`.
    pub fn build_with_source<K, V, S>(self, source: S) -> TunableCache<K, V, S, T>
    where
        K: Eq + Hash + Clone,
        S: ConfigSource,
        T: TelemetrySink<K>,
    {
        let config = self.config();
        TunableCache::with_config(source, self.sink, config)
    }
}
