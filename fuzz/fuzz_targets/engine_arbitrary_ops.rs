#![no_main]

use libfuzzer_sys::fuzz_target;
use tunecache::config::{RawConfig, SharedConfig};
use tunecache::engine::TunableCache;
use tunecache::policy::CachePolicy;
use tunecache::telemetry::RecordingSink;

// Fuzz arbitrary operation sequences on TunableCache
//
// Drives put/get/contains/reconfigure through a shared config handle,
// including invalid configurations, and checks capacity, index consistency
// and the one-event-per-call telemetry contract after every step.
fuzz_target!(|data: &[u8]| {
    let tunables = SharedConfig::new(RawConfig::new(0, 4, "lfu"));
    let sink = RecordingSink::new();
    let Ok(mut cache) = TunableCache::new(tunables.clone(), sink.clone()) else {
        return;
    };
    let mut expected_events = 0usize;

    for chunk in data.chunks_exact(3) {
        let key = u16::from(chunk[1] % 64);
        match chunk[0] % 5 {
            0 | 1 => {
                cache.put(key, chunk[2]);
                expected_events += 1;
                if cache.capacity() > 0 {
                    assert!(cache.contains(&key));
                    expected_events += 1;
                }
            },
            2 => {
                cache.get(&key);
                expected_events += 1;
            },
            3 => {
                cache.contains(&key);
                expected_events += 1;
            },
            _ => {
                let before = cache.config();
                let len_before = cache.len();
                let capacity = i64::from(chunk[1] % 16) - 2;
                let policy = match chunk[2] % 4 {
                    3 => "random".to_string(),
                    n => CachePolicy::ALL[n as usize].to_string(),
                };
                tunables.update(|raw| {
                    raw.id += 1;
                    raw.capacity = capacity;
                    raw.policy = policy;
                });
                match cache.reconfigure() {
                    Ok(()) => assert!(cache.is_empty()),
                    Err(_) => {
                        assert_eq!(cache.config(), before);
                        assert_eq!(cache.len(), len_before);
                    },
                }
            },
        }

        assert!(cache.len() <= cache.capacity());
        assert!(cache.check_invariants().is_ok());
        assert_eq!(sink.len(), expected_events);
    }
});
