//! Engine counters, snapshots and export (enabled by the `metrics` feature).
//!
//! Recording, snapshotting and exporting are separate concerns:
//!
//! ```text
//!   TunableCache ──record_*──► EngineMetrics (counters)
//!        │
//!        └──metrics_snapshot()──► EngineMetricsSnapshot ──export──► MetricsExporter
//!                                                                  (PrometheusTextExporter)
//! ```

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::EngineMetrics;
pub use snapshot::EngineMetricsSnapshot;
pub use traits::{
    EngineMetricsReadRecorder, EngineMetricsRecorder, MetricsExporter, MetricsSnapshotProvider,
};
