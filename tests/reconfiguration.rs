// ==============================================
// RECONFIGURATION TESTS (integration)
// ==============================================
//
// Configuration flows from each kind of source into a live cache.

use std::io::Write;

use tunecache::config::{RawConfig, SharedConfig, TomlFileConfig};
use tunecache::engine::TunableCache;
use tunecache::error::{CacheError, ConfigError};
use tunecache::policy::CachePolicy;
use tunecache::telemetry::{NoopSink, RecordingSink, TracingSink};
use tunecache::workload;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ==============================================
// TOML file source
// ==============================================

mod toml_file {
    use super::*;

    fn write_config(file: &mut tempfile::NamedTempFile, text: &str) {
        file.as_file().set_len(0).unwrap();
        let mut handle = file.reopen().unwrap();
        handle.write_all(text.as_bytes()).unwrap();
        handle.flush().unwrap();
    }

    #[test]
    fn file_edits_apply_on_reconfigure() {
        init_tracing();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write_config(&mut file, "id = 1\ncapacity = 2\npolicy = \"lru\"\n");

        let mut cache: TunableCache<u64, u64, _, _> =
            TunableCache::new(TomlFileConfig::new(file.path()), TracingSink).unwrap();
        assert_eq!(cache.capacity(), 2);
        cache.put(1, 1);

        write_config(
            &mut file,
            "id = 2\ncapacity = 16\npolicy = \"least_frequently_used\"\n",
        );
        cache.reconfigure().unwrap();

        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 16);
        assert_eq!(cache.policy(), CachePolicy::LeastFrequentlyUsed);
        assert_eq!(cache.config_id().0, 2);
    }

    #[test]
    fn broken_file_keeps_running_config() {
        init_tracing();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write_config(&mut file, "capacity = 3\npolicy = \"mru\"\n");

        let mut cache: TunableCache<u64, u64, _, _> =
            TunableCache::new(TomlFileConfig::new(file.path()), NoopSink).unwrap();
        cache.put(1, 1);

        write_config(&mut file, "capacity = [not toml");
        assert!(matches!(
            cache.reconfigure(),
            Err(CacheError::InvalidConfig(_))
        ));
        assert_eq!(cache.policy(), CachePolicy::MostRecentlyUsed);
        assert!(cache.contains(&1));
    }

    #[test]
    fn missing_file_fails_construction() {
        let dir = tempfile::tempdir().unwrap();
        let source = TomlFileConfig::new(dir.path().join("absent.toml"));
        let result: Result<TunableCache<u64, u64, _, _>, _> = TunableCache::new(source, NoopSink);
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }
}

// ==============================================
// Shared tuner handle
// ==============================================

mod shared_tuner {
    use super::*;

    #[test]
    fn tuner_switches_policy_between_workloads() {
        init_tracing();
        let tunables = SharedConfig::new(RawConfig::new(1, 8, "lru"));
        let sink = RecordingSink::new();
        let mut cache = TunableCache::new(tunables.clone(), sink.clone()).unwrap();

        let lru = workload::lfu_friendly(&mut cache, 8, 4, 3);

        tunables.update(|raw| {
            raw.id = 2;
            raw.policy = "lfu".into();
        });
        cache.reconfigure().unwrap();
        let lfu = workload::lfu_friendly(&mut cache, 8, 4, 3);

        assert!(lfu.hits > lru.hits);
        let events = sink.events();
        let from_second = events.iter().filter(|e| e.config_id.0 == 2).count() as u64;
        assert_eq!(from_second, lfu.requests + lfu.misses);
    }

    #[test]
    fn rejected_update_can_be_corrected() {
        let tunables = SharedConfig::new(RawConfig::new(1, 4, "mru"));
        let mut cache: TunableCache<u32, u32, _, _> =
            TunableCache::new(tunables.clone(), NoopSink).unwrap();
        cache.put(1, 1);

        tunables.set_policy("second-chance");
        assert_eq!(
            cache.reconfigure(),
            Err(CacheError::UnsupportedPolicy("second-chance".into()))
        );
        assert_eq!(cache.len(), 1);

        tunables.set_policy("least-recently-used");
        cache.reconfigure().unwrap();
        assert_eq!(cache.policy(), CachePolicy::LeastRecentlyUsed);
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_capacity_then_grow() {
        let tunables = SharedConfig::new(RawConfig::new(1, 0, "lfu"));
        let mut cache: TunableCache<u32, u32, _, _> =
            TunableCache::new(tunables.clone(), NoopSink).unwrap();
        cache.put(1, 1);
        assert!(cache.is_empty());

        tunables.set_capacity(2);
        cache.reconfigure().unwrap();
        cache.put(1, 1);
        assert!(cache.contains(&1));
    }
}

// ==============================================
// Closure source
// ==============================================

mod closure_source {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn closure_is_called_once_per_reconfigure() {
        let calls = Cell::new(0u32);
        let source = || -> Result<RawConfig, ConfigError> {
            calls.set(calls.get() + 1);
            Ok(RawConfig::new(u64::from(calls.get()), 4, "lru"))
        };

        let mut cache: TunableCache<u32, u32, _, _> = TunableCache::new(&source, NoopSink).unwrap();
        assert_eq!(calls.get(), 1);
        cache.get(&1);
        cache.put(1, 1);
        assert_eq!(calls.get(), 1);

        cache.reconfigure().unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.config_id().0, 2);
    }
}
