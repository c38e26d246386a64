pub use crate::builder::CacheBuilder;
#[cfg(feature = "concurrency")]
pub use crate::concurrent::ConcurrentTunableCache;
pub use crate::config::{
    CacheConfig, ConfigId, ConfigSource, RawConfig, SharedConfig, StaticConfig, TomlFileConfig,
};
pub use crate::ds::{IntrusiveList, SlotArena, SlotId};
pub use crate::engine::{PREALLOC_LIMIT, TunableCache};
pub use crate::error::{CacheError, ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{EngineMetricsSnapshot, MetricsExporter, PrometheusTextExporter};
pub use crate::policy::CachePolicy;
pub use crate::telemetry::{
    CacheRequestEvent, NoopSink, RecordedEvent, RecordingSink, TelemetrySink, TracingSink,
};
pub use crate::traits::EvictionStrategy;
pub use crate::workload::WorkloadStats;
