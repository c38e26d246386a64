//! # Metrics Traits
//!
//! Recording, snapshotting and export are split into small traits so the
//! engine only ever writes counters and never knows who reads them.
//!
//! ```text
//!   ┌─────────────────────────────┐   ┌─────────────────────────────┐
//!   │ EngineMetricsRecorder       │   │ EngineMetricsReadRecorder   │
//!   │ (&mut self: get/put/evict/  │   │ (&self: existence checks)   │
//!   │  reconfigure)               │   │                             │
//!   └──────────────┬──────────────┘   └──────────────┬──────────────┘
//!                  └───────────────┬─────────────────┘
//!                                  ▼
//!                           EngineMetrics
//!                                  │ snapshot
//!                                  ▼
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters for operations that take `&mut self`.
pub trait EngineMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_put_new(&mut self);
    fn record_put_existing(&mut self);
    /// A `put` dropped because capacity is zero.
    fn record_put_rejected(&mut self);
    fn record_eviction(&mut self);
    fn record_reconfigure(&mut self);
    fn record_reconfigure_rejected(&mut self);
}

/// Counters for operations that only take `&self` (uses interior mutability).
pub trait EngineMetricsReadRecorder {
    fn record_request_call(&self);
    fn record_request_hit(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
