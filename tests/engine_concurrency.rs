// ==============================================
// SHARED CACHE CONCURRENCY TESTS (integration)
// ==============================================
#![cfg(feature = "concurrency")]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use tunecache::builder::CacheBuilder;
use tunecache::concurrent::ConcurrentTunableCache;
use tunecache::config::{RawConfig, SharedConfig};
use tunecache::engine::TunableCache;
use tunecache::policy::CachePolicy;
use tunecache::telemetry::RecordingSink;
use tunecache::workload;

#[test]
fn workload_threads_see_consistent_hit_counts() {
    let sink = RecordingSink::new();
    let cache = ConcurrentTunableCache::new(
        CacheBuilder::new(64)
            .policy(CachePolicy::LeastRecentlyUsed)
            .telemetry(sink.clone())
            .build::<u64, u64>(),
    );
    let hits = Arc::new(AtomicU64::new(0));

    let handles: Vec<_> = (0..8u64)
        .map(|thread_id| {
            let cache = cache.clone();
            let hits = Arc::clone(&hits);
            thread::spawn(move || {
                for i in 0..500u64 {
                    let key = (thread_id * 7 + i) % 96;
                    let hit = cache.with_engine(|engine| workload::get_or_put(engine, key));
                    if hit {
                        hits.fetch_add(1, Ordering::Relaxed);
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(cache.len() <= 64);
    assert_eq!(sink.hits() as u64, hits.load(Ordering::Relaxed));
    cache.with_engine(|engine| engine.check_invariants()).unwrap();
}

#[test]
fn reconfigure_races_with_readers() {
    let tunables = SharedConfig::new(RawConfig::new(0, 32, "lfu"));
    let engine: TunableCache<u32, u32, _, _> =
        TunableCache::new(tunables.clone(), RecordingSink::new()).unwrap();
    let cache = ConcurrentTunableCache::new(engine);

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let cache = cache.clone();
            thread::spawn(move || {
                for key in 0..1_000u32 {
                    if cache.get_with(&(key % 40), |v| *v).is_none() {
                        cache.put(key % 40, key);
                    }
                }
            })
        })
        .collect();

    for round in 0..20u64 {
        let policy = CachePolicy::ALL[(round % 3) as usize];
        tunables.update(|raw| {
            raw.id = round;
            raw.capacity = 8 + round as i64;
            raw.policy = policy.to_string();
        });
        cache.reconfigure().unwrap();
    }

    for reader in readers {
        reader.join().unwrap();
    }

    let config = cache.config();
    assert_eq!(config.capacity(), 27);
    assert_eq!(config.policy(), CachePolicy::ALL[19 % 3]);
    cache.with_engine(|engine| engine.check_invariants()).unwrap();
}
