use crate::config::ConfigId;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EngineMetricsSnapshot {
    pub requests: u64,
    pub request_hits: u64,

    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub put_calls: u64,
    pub put_new: u64,
    pub put_existing: u64,
    pub put_rejected: u64,

    pub evictions: u64,
    pub reconfigurations: u64,
    pub rejected_reconfigurations: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
    pub config_id: ConfigId,
}

impl EngineMetricsSnapshot {
    /// Fraction of existence checks that found the key, `0.0` with no requests.
    pub fn request_hit_ratio(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.request_hits as f64 / self.requests as f64
        }
    }
}
