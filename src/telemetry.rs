//! Per-request telemetry.
//!
//! Every existence check the engine performs (a direct `contains`, and the
//! check at the start of `get`, `get_mut` and `put`) produces exactly one
//! [`CacheRequestEvent`] delivered to the cache's [`TelemetrySink`].
//! Delivery is fire-and-forget: `record` returns nothing, so a sink that
//! drops or fails to forward an event cannot turn into a cache error.
//!
//! ## Sinks
//!
//! - [`NoopSink`]: discards everything.
//! - [`TracingSink`]: one `tracing` event per request at `TRACE` level.
//! - [`RecordingSink`]: keeps owned copies of events; clones share storage,
//!   so a caller can hand one clone to the cache and inspect the other.
//! - any `Fn(&CacheRequestEvent<'_, K>)` closure.
//!
//! ```
//! use tunecache::builder::CacheBuilder;
//! use tunecache::telemetry::RecordingSink;
//!
//! let sink = RecordingSink::new();
//! let mut cache = CacheBuilder::new(4).telemetry(sink.clone()).build::<u32, &str>();
//!
//! cache.put(1, "one");
//! cache.get(&1);
//! cache.get(&2);
//!
//! let hits: Vec<bool> = sink.events().iter().map(|e| e.hit).collect();
//! assert_eq!(hits, vec![false, true, false]);
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::config::ConfigId;

/// One cache lookup as seen from outside.
#[derive(Debug)]
pub struct CacheRequestEvent<'a, K> {
    pub config_id: ConfigId,
    pub key: &'a K,
    pub hit: bool,
}

/// Receives one event per existence check.
pub trait TelemetrySink<K> {
    fn record(&self, event: &CacheRequestEvent<'_, K>);
}

impl<K, F> TelemetrySink<K> for F
where
    F: Fn(&CacheRequestEvent<'_, K>),
{
    fn record(&self, event: &CacheRequestEvent<'_, K>) {
        self(event)
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl<K> TelemetrySink<K> for NoopSink {
    #[inline]
    fn record(&self, _event: &CacheRequestEvent<'_, K>) {}
}

/// Emits each event as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl<K: Debug> TelemetrySink<K> for TracingSink {
    fn record(&self, event: &CacheRequestEvent<'_, K>) {
        trace!(
            target: "tunecache::request",
            config_id = event.config_id.0,
            key = ?event.key,
            hit = event.hit,
            "cache request"
        );
    }
}

/// Owned copy of a [`CacheRequestEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent<K> {
    pub config_id: ConfigId,
    pub key: K,
    pub hit: bool,
}

/// Stores every event it receives.
#[derive(Debug)]
pub struct RecordingSink<K> {
    events: Arc<Mutex<Vec<RecordedEvent<K>>>>,
}

impl<K> RecordingSink<K> {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn hits(&self) -> usize {
        self.events.lock().iter().filter(|e| e.hit).count()
    }

    pub fn misses(&self) -> usize {
        self.events.lock().iter().filter(|e| !e.hit).count()
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&self) -> Vec<RecordedEvent<K>> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl<K: Clone> RecordingSink<K> {
    /// Returns a copy of everything recorded so far.
    pub fn events(&self) -> Vec<RecordedEvent<K>> {
        self.events.lock().clone()
    }
}

impl<K> Clone for RecordingSink<K> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}

impl<K> Default for RecordingSink<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone> TelemetrySink<K> for RecordingSink<K> {
    fn record(&self, event: &CacheRequestEvent<'_, K>) {
        self.events.lock().push(RecordedEvent {
            config_id: event.config_id,
            key: event.key.clone(),
            hit: event.hit,
        });
    }
}
