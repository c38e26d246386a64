//! tunecache: a fixed-capacity in-memory cache whose eviction policy and
//! capacity are tuned at runtime.
//!
//! The engine ([`engine::TunableCache`]) reports every lookup to a
//! [`telemetry::TelemetrySink`] and pulls new settings from a
//! [`config::ConfigSource`] when asked to `reconfigure`. LFU, LRU and MRU
//! eviction are available; switching policy resets the cache.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod builder;
#[cfg(feature = "concurrency")]
pub mod concurrent;
pub mod config;
pub mod ds;
pub mod engine;
pub mod error;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod strategy;
pub mod telemetry;
pub mod traits;
pub mod workload;
