//! Thread-safe handle over a [`TunableCache`] (enabled by the `concurrency`
//! feature).
//!
//! The engine itself is single-threaded. [`ConcurrentTunableCache`] wraps
//! one in an `Arc<parking_lot::Mutex<_>>` so clones can be shared across
//! threads; every call takes the lock for its whole duration, so operations
//! are serialized exactly as if one thread issued them.
//!
//! Borrows of cached values cannot escape the lock, so reads go through
//! closures:
//!
//! ```
//! use tunecache::builder::CacheBuilder;
//! use tunecache::concurrent::ConcurrentTunableCache;
//!
//! let cache = ConcurrentTunableCache::new(CacheBuilder::new(16).build::<u32, String>());
//! let handle = cache.clone();
//!
//! std::thread::spawn(move || {
//!     handle.put(1, "one".to_string());
//! })
//! .join()
//! .unwrap();
//!
//! assert_eq!(cache.get_with(&1, |v| v.len()), Some(3));
//! ```

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::{CacheConfig, ConfigSource, StaticConfig};
use crate::engine::TunableCache;
use crate::error::CacheError;
use crate::telemetry::{NoopSink, TelemetrySink};

/// Cloneable, lock-protected cache handle.
pub struct ConcurrentTunableCache<K, V, S = StaticConfig, T = NoopSink> {
    inner: Arc<Mutex<TunableCache<K, V, S, T>>>,
}

impl<K, V, S, T> Clone for ConcurrentTunableCache<K, V, S, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V, S, T> fmt::Debug for ConcurrentTunableCache<K, V, S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("ConcurrentTunableCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .field("policy", &cache.policy())
            .finish_non_exhaustive()
    }
}

impl<K, V, S, T> ConcurrentTunableCache<K, V, S, T>
where
    K: Eq + Hash + Clone,
    S: ConfigSource,
    T: TelemetrySink<K>,
{
    pub fn new(cache: TunableCache<K, V, S, T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    /// Runs `f` on the value for `key` after promoting it.
    pub fn get_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.inner.lock().get(key).map(f)
    }

    /// Runs `f` on a mutable borrow of the value for `key` after promoting it.
    pub fn get_mut_with<R>(&self, key: &K, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        self.inner.lock().get_mut(key).map(f)
    }

    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        self.inner.lock().put(key, value)
    }

    pub fn reconfigure(&self) -> Result<(), CacheError> {
        self.inner.lock().reconfigure()
    }

    pub fn apply(&self, config: CacheConfig) {
        self.inner.lock().apply(config);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn config(&self) -> CacheConfig {
        self.inner.lock().config()
    }

    /// Runs `f` with exclusive access to the underlying engine.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut TunableCache<K, V, S, T>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
