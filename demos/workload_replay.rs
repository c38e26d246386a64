//! Replays the bundled access patterns under every policy, switching policy
//! through a shared configuration handle the way an external tuner would.
//!
//! Run with: `cargo run --example workload_replay`
//! Set `RUST_LOG=tunecache=debug` to see each reconfiguration.

use std::error::Error;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use tunecache::config::{RawConfig, SharedConfig};
use tunecache::engine::TunableCache;
use tunecache::policy::CachePolicy;
use tunecache::telemetry::RecordingSink;
use tunecache::workload::{self, WorkloadStats};

const CAPACITY: i64 = 64;

type Cache = TunableCache<u64, u64, SharedConfig, RecordingSink<u64>>;

fn run(name: &str, cache: &mut Cache, pattern: impl Fn(&mut Cache) -> WorkloadStats) {
    let stats = pattern(cache);
    info!(
        workload = name,
        policy = %cache.policy(),
        config_id = %cache.config_id(),
        requests = stats.requests,
        hits = stats.hits,
        hit_ratio = stats.hit_ratio(),
        "workload finished"
    );
    println!("{name:<14} {:<4} {stats}", cache.policy().as_str());
}

fn main() -> Result<(), Box<dyn Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let tunables = SharedConfig::new(RawConfig::new(0, CAPACITY, "lru"));
    let sink = RecordingSink::new();
    let mut cache: Cache = TunableCache::new(tunables.clone(), sink.clone())?;

    for (id, policy) in CachePolicy::ALL.into_iter().enumerate() {
        tunables.update(|raw| {
            raw.id = id as u64 + 1;
            raw.policy = policy.to_string();
        });

        cache.reconfigure()?;
        run("cyclical x2", &mut cache, |c| {
            let mut total = workload::cyclical(c, 2 * CAPACITY as u64);
            total += workload::cyclical(c, 2 * CAPACITY as u64);
            total
        });

        cache.reconfigure()?;
        run("elevator", &mut cache, |c| workload::elevator(c, 2 * CAPACITY as u64));

        cache.reconfigure()?;
        run("lfu-friendly", &mut cache, |c| {
            workload::lfu_friendly(c, CAPACITY as u64, 4, 3)
        });
    }

    println!(
        "telemetry: {} events, {} hits, {} misses",
        sink.len(),
        sink.hits(),
        sink.misses()
    );

    tunables.set_policy("adaptive-replacement");
    if let Err(err) = cache.reconfigure() {
        println!("rejected update kept {} running: {err}", cache.policy());
    }
    Ok(())
}
