use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{EngineMetricsReadRecorder, EngineMetricsRecorder};

#[derive(Debug, Default)]
pub struct EngineMetrics {
    pub requests: MetricsCell,
    pub request_hits: MetricsCell,
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
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl EngineMetricsRecorder for EngineMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_put_new(&mut self) {
        self.put_calls += 1;
        self.put_new += 1;
    }

    fn record_put_existing(&mut self) {
        self.put_calls += 1;
        self.put_existing += 1;
    }

    fn record_put_rejected(&mut self) {
        self.put_calls += 1;
        self.put_rejected += 1;
    }

    fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    fn record_reconfigure(&mut self) {
        self.reconfigurations += 1;
    }

    fn record_reconfigure_rejected(&mut self) {
        self.rejected_reconfigurations += 1;
    }
}

impl EngineMetricsReadRecorder for &EngineMetrics {
    fn record_request_call(&self) {
        self.requests.incr();
    }

    fn record_request_hit(&self) {
        self.request_hits.incr();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_counters_split_hits_and_misses() {
        let mut m = EngineMetrics::new();
        m.record_get_hit();
        m.record_get_miss();
        m.record_get_miss();
        assert_eq!((m.get_calls, m.get_hits, m.get_misses), (3, 1, 2));
    }

    #[test]
    fn put_counters_sum_to_calls() {
        let mut m = EngineMetrics::new();
        m.record_put_new();
        m.record_put_existing();
        m.record_put_rejected();
        assert_eq!(m.put_calls, m.put_new + m.put_existing + m.put_rejected);
    }

    #[test]
    fn read_recorder_works_through_shared_ref() {
        let m = EngineMetrics::new();
        (&m).record_request_call();
        (&m).record_request_call();
        (&m).record_request_hit();
        assert_eq!(m.requests.get(), 2);
        assert_eq!(m.request_hits.get(), 1);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut m = EngineMetrics::new();
        m.record_eviction();
        m.record_reconfigure();
        (&m).record_request_call();
        m.reset();
        assert_eq!(m.evictions, 0);
        assert_eq!(m.reconfigurations, 0);
        assert_eq!(m.requests.get(), 0);
    }
}
