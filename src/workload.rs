//! Access patterns for exercising a cache under different policies.
//!
//! Every pattern is built from [`get_or_put`]: read the key and, on a miss,
//! store `key -> key`. Keys are `u64` and the cache stores them as values
//! too, so the patterns run against any sink and any configuration source.
//!
//! | Pattern | Key sequence | Favors |
//! |---------|--------------|--------|
//! | [`cyclical`] | `1, 2, .., n-1` | MRU once `n` exceeds capacity and the pattern repeats |
//! | [`elevator`] | `1, .., n-1, n, n-1, .., 1` | LRU/MRU on the way back down |
//! | [`lfu_friendly`] | hot set read `freq` times, then one-shot keys interleaved with hot keys | LFU |
//!
//! ```
//! use tunecache::builder::CacheBuilder;
//! use tunecache::policy::CachePolicy;
//! use tunecache::workload;
//!
//! let mut lfu = CacheBuilder::new(8).policy(CachePolicy::LeastFrequentlyUsed).build();
//! let mut lru = CacheBuilder::new(8).policy(CachePolicy::LeastRecentlyUsed).build();
//!
//! let lfu_stats = workload::lfu_friendly(&mut lfu, 8, 4, 3);
//! let lru_stats = workload::lfu_friendly(&mut lru, 8, 4, 3);
//! assert!(lfu_stats.hit_ratio() > lru_stats.hit_ratio());
//! ```

use std::fmt;
use std::ops::AddAssign;

use crate::config::ConfigSource;
use crate::engine::TunableCache;
use crate::telemetry::TelemetrySink;

/// Outcome counts of one workload run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkloadStats {
    pub requests: u64,
    pub hits: u64,
    pub misses: u64,
}

impl WorkloadStats {
    pub fn record(&mut self, hit: bool) {
        self.requests += 1;
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    /// Hits over requests, `0.0` for an empty run.
    pub fn hit_ratio(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            self.hits as f64 / self.requests as f64
        }
    }
}

impl AddAssign for WorkloadStats {
    fn add_assign(&mut self, rhs: Self) {
        self.requests += rhs.requests;
        self.hits += rhs.hits;
        self.misses += rhs.misses;
    }
}

impl fmt::Display for WorkloadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requests, {} hits, {} misses ({:.1}% hit ratio)",
            self.requests,
            self.hits,
            self.misses,
            self.hit_ratio() * 100.0
        )
    }
}

/// Reads `key`; on a miss stores `key -> key`. Returns whether it hit.
pub fn get_or_put<S, T>(cache: &mut TunableCache<u64, u64, S, T>, key: u64) -> bool
where
    S: ConfigSource,
    T: TelemetrySink<u64>,
{
    if cache.get(&key).is_some() {
        return true;
    }
    cache.put(key, key);
    false
}

/// Keys `1..n` in order.
pub fn cyclical<S, T>(cache: &mut TunableCache<u64, u64, S, T>, n: u64) -> WorkloadStats
where
    S: ConfigSource,
    T: TelemetrySink<u64>,
{
    let mut stats = WorkloadStats::default();
    for key in 1..n {
        stats.record(get_or_put(cache, key));
    }
    stats
}

/// Keys `1..n` on the way up, then `n` down to `1`.
pub fn elevator<S, T>(cache: &mut TunableCache<u64, u64, S, T>, n: u64) -> WorkloadStats
where
    S: ConfigSource,
    T: TelemetrySink<u64>,
{
    let mut stats = WorkloadStats::default();
    for key in (1..n).chain((1..=n).rev()) {
        stats.record(get_or_put(cache, key));
    }
    stats
}

/// A pattern where frequency beats recency.
///
/// Keys `0..size` are each read `freq` times. Then, `repetitions` times,
/// every hot key `1..size` is read once followed by `size` keys that are
/// never seen again. A recency policy lets the one-shot keys flush the hot
/// set; a frequency policy keeps it.
pub fn lfu_friendly<S, T>(
    cache: &mut TunableCache<u64, u64, S, T>,
    size: u64,
    freq: u32,
    repetitions: u32,
) -> WorkloadStats
where
    S: ConfigSource,
    T: TelemetrySink<u64>,
{
    let mut stats = WorkloadStats::default();
    for key in 0..size {
        for _ in 0..freq {
            stats.record(get_or_put(cache, key));
        }
    }

    let mut one_shot = size;
    stats.record(get_or_put(cache, one_shot));
    one_shot += 1;

    for _ in 0..repetitions {
        for hot in 1..size {
            stats.record(get_or_put(cache, hot));
            for _ in 0..size {
                stats.record(get_or_put(cache, one_shot));
                one_shot += 1;
            }
        }
    }
    stats
}
