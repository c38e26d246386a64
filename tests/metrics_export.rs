// ==============================================
// METRICS EXPORT TESTS (integration)
// ==============================================
#![cfg(feature = "metrics")]

use tunecache::builder::CacheBuilder;
use tunecache::metrics::{MetricsExporter, MetricsSnapshotProvider, PrometheusTextExporter};
use tunecache::policy::CachePolicy;
use tunecache::workload;

#[test]
fn workload_counters_reach_prometheus_text() {
    let mut cache = CacheBuilder::new(8)
        .policy(CachePolicy::LeastFrequentlyUsed)
        .config_id(3)
        .build();
    let stats = workload::lfu_friendly(&mut cache, 8, 4, 3);

    let snapshot = cache.snapshot();
    assert_eq!(snapshot.get_calls, stats.requests);
    assert_eq!(snapshot.get_hits, stats.hits);
    assert_eq!(snapshot.put_new, stats.misses);
    assert_eq!(snapshot.requests, stats.requests + stats.misses);
    assert_eq!(snapshot.evictions, stats.misses - 8);

    let exporter = PrometheusTextExporter::new("tunecache", Vec::new());
    exporter.export(&snapshot);
    let text = String::from_utf8(exporter.into_inner()).unwrap();

    assert!(text.contains(&format!("tunecache_get_hits_total {}\n", stats.hits)));
    assert!(text.contains("tunecache_cache_len 8\n"));
    assert!(text.contains("tunecache_config_id 3\n"));
}

#[test]
fn reconfigure_counters() {
    let mut cache = CacheBuilder::new(2).build::<u32, u32>();
    cache.reconfigure().unwrap();
    cache.reconfigure().unwrap();
    let snapshot = cache.metrics_snapshot();
    assert_eq!(snapshot.reconfigurations, 2);
    assert_eq!(snapshot.rejected_reconfigurations, 0);
}
