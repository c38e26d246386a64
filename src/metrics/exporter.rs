use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::EngineMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for engine metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// directly or forwarded to a collector. Write errors are dropped; export
/// never fails the caller.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", suffix, value);
    }

    fn write_gauge(&self, suffix: &str, value: u64) {
        self.write_metric("gauge", suffix, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<EngineMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &EngineMetricsSnapshot) {
        self.write_counter("requests_total", snapshot.requests);
        self.write_counter("request_hits_total", snapshot.request_hits);
        self.write_counter("get_calls_total", snapshot.get_calls);
        self.write_counter("get_hits_total", snapshot.get_hits);
        self.write_counter("get_misses_total", snapshot.get_misses);
        self.write_counter("put_calls_total", snapshot.put_calls);
        self.write_counter("put_new_total", snapshot.put_new);
        self.write_counter("put_existing_total", snapshot.put_existing);
        self.write_counter("put_rejected_total", snapshot.put_rejected);
        self.write_counter("evictions_total", snapshot.evictions);
        self.write_counter("reconfigurations_total", snapshot.reconfigurations);
        self.write_counter(
            "rejected_reconfigurations_total",
            snapshot.rejected_reconfigurations,
        );
        self.write_gauge("cache_len", snapshot.cache_len as u64);
        self.write_gauge("capacity", snapshot.capacity as u64);
        self.write_gauge("config_id", snapshot.config_id.0);
    }
}
