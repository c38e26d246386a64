//! Cache configuration and the sources it is pulled from.
//!
//! The engine never watches its configuration. It asks a [`ConfigSource`]
//! for a [`RawConfig`] only when [`TunableCache::reconfigure`] is called,
//! validates it into a [`CacheConfig`], and only then tears down and rebuilds
//! its structures. A rejected configuration leaves the cache untouched.
//!
//! ## Sources
//!
//! | Source | Backing | Typical use |
//! |--------|---------|-------------|
//! | [`StaticConfig`] | a fixed `RawConfig` | tests, embedded defaults |
//! | [`SharedConfig`] | `Arc<RwLock<RawConfig>>` | an external tuner adjusts values, the owner calls `reconfigure` |
//! | [`TomlFileConfig`] | a TOML file, re-read on every load | operator-edited settings |
//! | `Fn() -> Result<RawConfig, ConfigError>` | any closure | ad-hoc adapters |
//!
//! ## File format
//!
//! ```toml
//! id = 3
//! capacity = 1024
//! policy = "least_frequently_used"
//! ```
//!
//! Missing keys fall back to [`RawConfig::default`].
//!
//! [`TunableCache::reconfigure`]: crate::engine::TunableCache::reconfigure

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{CacheError, ConfigError};
use crate::policy::CachePolicy;

/// Identity of the configuration a cache is running under.
///
/// Stamped on every telemetry event so consumers can attribute hit ratios to
/// the capacity/policy pair that produced them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigId(pub u64);

impl fmt::Display for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration as supplied by a source, before validation.
///
/// Capacity is signed and the policy is free text because that is what
/// external tuners and files hand over; [`RawConfig::validate`] is the single
/// place both are checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub id: u64,
    pub capacity: i64,
    pub policy: String,
}

impl RawConfig {
    pub fn new(id: u64, capacity: i64, policy: impl Into<String>) -> Self {
        Self {
            id,
            capacity,
            policy: policy.into(),
        }
    }

    /// Parses a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text)
            .map_err(|err| ConfigError::new(format!("failed to parse configuration: {err}")))
    }

    /// Checks capacity and policy and produces a [`CacheConfig`].
    ///
    /// # Errors
    ///
    /// - [`CacheError::InvalidConfig`] for a negative or unaddressable
    ///   capacity, or for policy text that is not a plain identifier.
    /// - [`CacheError::UnsupportedPolicy`] for an identifier that names no
    ///   known policy.
    pub fn validate(&self) -> Result<CacheConfig, CacheError> {
        if self.capacity < 0 {
            return Err(ConfigError::new(format!(
                "capacity must be >= 0, got {}",
                self.capacity
            ))
            .into());
        }
        let capacity = usize::try_from(self.capacity).map_err(|_| {
            ConfigError::new(format!(
                "capacity {} exceeds the addressable range",
                self.capacity
            ))
        })?;
        let policy = self.policy.parse::<CachePolicy>()?;
        Ok(CacheConfig::new(ConfigId(self.id), capacity, policy))
    }
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            id: 0,
            capacity: 0,
            policy: CachePolicy::default().as_str().to_string(),
        }
    }
}

impl From<CacheConfig> for RawConfig {
    fn from(config: CacheConfig) -> Self {
        Self {
            id: config.id.0,
            // Saturates only on targets where usize exceeds i64.
            capacity: i64::try_from(config.capacity).unwrap_or(i64::MAX),
            policy: config.policy.as_str().to_string(),
        }
    }
}

/// A validated configuration: everything the engine needs to rebuild itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    id: ConfigId,
    capacity: usize,
    policy: CachePolicy,
}

impl CacheConfig {
    pub fn new(id: ConfigId, capacity: usize, policy: CachePolicy) -> Self {
        Self {
            id,
            capacity,
            policy,
        }
    }

    pub fn id(&self) -> ConfigId {
        self.id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }
}

/// Supplies configuration to the engine on demand.
///
/// Called only from within reconfiguration, never on the lookup path.
pub trait ConfigSource {
    fn load(&self) -> Result<RawConfig, ConfigError>;
}

impl<F> ConfigSource for F
where
    F: Fn() -> Result<RawConfig, ConfigError>,
{
    fn load(&self) -> Result<RawConfig, ConfigError> {
        self()
    }
}

// ---------------------------------------------------------------------------
// StaticConfig
// ---------------------------------------------------------------------------

/// A source that always returns the same configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticConfig {
    raw: RawConfig,
}

impl StaticConfig {
    pub fn new(raw: RawConfig) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &RawConfig {
        &self.raw
    }
}

impl From<CacheConfig> for StaticConfig {
    fn from(config: CacheConfig) -> Self {
        Self::new(config.into())
    }
}

impl ConfigSource for StaticConfig {
    fn load(&self) -> Result<RawConfig, ConfigError> {
        Ok(self.raw.clone())
    }
}

// ---------------------------------------------------------------------------
// SharedConfig
// ---------------------------------------------------------------------------

/// A tunable configuration handle shared between the cache and a tuner.
///
/// Clones share the same underlying values. Writes are visible to the cache
/// only at its next `reconfigure`.
///
/// ```
/// use tunecache::config::{RawConfig, SharedConfig};
/// use tunecache::engine::TunableCache;
/// use tunecache::telemetry::NoopSink;
///
/// let tunables = SharedConfig::new(RawConfig::new(1, 2, "lru"));
/// let mut cache: TunableCache<u32, u32, _, _> =
///     TunableCache::new(tunables.clone(), NoopSink).unwrap();
///
/// tunables.set_capacity(64);
/// assert_eq!(cache.capacity(), 2);
/// cache.reconfigure().unwrap();
/// assert_eq!(cache.capacity(), 64);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<RawConfig>>,
}

impl SharedConfig {
    pub fn new(raw: RawConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(raw)),
        }
    }

    /// Returns a copy of the current values.
    pub fn snapshot(&self) -> RawConfig {
        self.inner.read().clone()
    }

    pub fn set_capacity(&self, capacity: i64) {
        self.inner.write().capacity = capacity;
    }

    pub fn set_policy(&self, policy: impl Into<String>) {
        self.inner.write().policy = policy.into();
    }

    pub fn set_id(&self, id: u64) {
        self.inner.write().id = id;
    }

    /// Applies several changes under one write lock.
    pub fn update(&self, f: impl FnOnce(&mut RawConfig)) {
        let mut raw = self.inner.write();
        f(&mut raw);
    }
}

impl ConfigSource for SharedConfig {
    fn load(&self) -> Result<RawConfig, ConfigError> {
        Ok(self.snapshot())
    }
}

// ---------------------------------------------------------------------------
// TomlFileConfig
// ---------------------------------------------------------------------------

/// A source that re-reads a TOML file on every load.
#[derive(Debug, Clone)]
pub struct TomlFileConfig {
    path: PathBuf,
}

impl TomlFileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for TomlFileConfig {
    fn load(&self) -> Result<RawConfig, ConfigError> {
        let text = std::fs::read_to_string(&self.path).map_err(|err| {
            ConfigError::new(format!("failed to read {}: {err}", self.path.display()))
        })?;
        RawConfig::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_zero_capacity() {
        let config = RawConfig::new(4, 0, "lfu").validate().unwrap();
        assert_eq!(config.capacity(), 0);
        assert_eq!(config.policy(), CachePolicy::LeastFrequentlyUsed);
        assert_eq!(config.id(), ConfigId(4));
    }

    #[test]
    fn validate_rejects_negative_capacity() {
        let err = RawConfig::new(0, -3, "lru").validate().unwrap_err();
        match err {
            CacheError::InvalidConfig(inner) => assert!(inner.message().contains("-3")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validate_reports_unsupported_policy() {
        let err = RawConfig::new(0, 10, "two_q").validate().unwrap_err();
        assert_eq!(err, CacheError::UnsupportedPolicy("two_q".to_string()));
    }

    #[test]
    fn validate_rejects_malformed_policy() {
        let err = RawConfig::new(0, 10, "lru, lfu").validate().unwrap_err();
        assert!(matches!(err, CacheError::InvalidConfig(_)));
    }

    #[test]
    fn raw_round_trips_through_cache_config() {
        let config = CacheConfig::new(ConfigId(9), 128, CachePolicy::MostRecentlyUsed);
        let raw = RawConfig::from(config);
        assert_eq!(raw, RawConfig::new(9, 128, "mru"));
        assert_eq!(raw.validate().unwrap(), config);
    }

    #[test]
    fn toml_defaults_fill_missing_keys() {
        let raw = RawConfig::from_toml_str("capacity = 32").unwrap();
        assert_eq!(raw.id, 0);
        assert_eq!(raw.capacity, 32);
        assert_eq!(raw.policy, "lru");
    }

    #[test]
    fn toml_parse_error_is_config_error() {
        let err = RawConfig::from_toml_str("capacity = \"many\"").unwrap_err();
        assert!(err.message().starts_with("failed to parse configuration"));
    }

    #[test]
    fn shared_config_clones_observe_updates() {
        let tuner = SharedConfig::new(RawConfig::new(1, 8, "lru"));
        let cache_side = tuner.clone();

        tuner.update(|raw| {
            raw.id = 2;
            raw.capacity = 16;
        });
        tuner.set_policy("mru");

        assert_eq!(cache_side.load().unwrap(), RawConfig::new(2, 16, "mru"));
    }

    #[test]
    fn closure_is_a_source() {
        let source = || -> Result<RawConfig, ConfigError> { Ok(RawConfig::new(5, 1, "lfu")) };
        assert_eq!(source.load().unwrap().id, 5);
    }

    #[test]
    fn toml_file_source_rereads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.toml");
        std::fs::write(&path, "id = 1\ncapacity = 4\npolicy = \"lru\"\n").unwrap();

        let source = TomlFileConfig::new(&path);
        assert_eq!(source.load().unwrap(), RawConfig::new(1, 4, "lru"));

        std::fs::write(&path, "id = 2\ncapacity = 8\npolicy = \"lfu\"\n").unwrap();
        assert_eq!(source.load().unwrap(), RawConfig::new(2, 8, "lfu"));
    }

    #[test]
    fn toml_file_source_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = TomlFileConfig::new(dir.path().join("absent.toml"));
        let err = source.load().unwrap_err();
        assert!(err.message().starts_with("failed to read"));
    }
}
