//! Error types for the tunecache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: a configuration value was rejected (negative capacity,
//!   malformed policy text, unreadable configuration file).
//! - [`CacheError`]: what [`TunableCache::reconfigure`] returns. Separates a
//!   well-formed but unknown policy name from every other configuration
//!   problem.
//! - [`InvariantError`]: returned by `check_invariants` when the index and
//!   the eviction structures disagree.
//!
//! Lookups and insertions never fail; only reconfiguration does, and a
//! failed reconfiguration leaves the cache exactly as it was.
//!
//! ## Example Usage
//!
//! ```
//! use tunecache::error::CacheError;
//! use tunecache::config::RawConfig;
//!
//! let err = RawConfig::new(0, 16, "arc").validate().unwrap_err();
//! assert!(matches!(err, CacheError::UnsupportedPolicy(ref name) if name == "arc"));
//!
//! let err = RawConfig::new(0, -1, "lru").validate().unwrap_err();
//! assert!(matches!(err, CacheError::InvalidConfig(_)));
//! ```
//!
//! [`TunableCache::reconfigure`]: crate::engine::TunableCache::reconfigure

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` on the engine and its data structures.
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when a configuration value is invalid or cannot be read.
///
/// # Example
///
/// ```
/// use tunecache::config::RawConfig;
///
/// let err = RawConfig::new(0, -5, "lfu").validate().unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// CacheError
// ---------------------------------------------------------------------------

/// Error returned by reconfiguration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The policy name is well formed but names no known eviction strategy.
    UnsupportedPolicy(String),
    /// Capacity or policy text could not be accepted, or the source failed.
    InvalidConfig(ConfigError),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::UnsupportedPolicy(name) => {
                write!(f, "unsupported eviction policy `{name}`")
            },
            CacheError::InvalidConfig(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::UnsupportedPolicy(_) => None,
            CacheError::InvalidConfig(err) => Some(err),
        }
    }
}

impl From<ConfigError> for CacheError {
    fn from(err: ConfigError) -> Self {
        CacheError::InvalidConfig(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("heap position mismatch");
        assert_eq!(err.to_string(), "heap position mismatch");
        assert_eq!(err.message(), "heap position mismatch");
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("capacity must be >= 0");
        assert_eq!(err.to_string(), "capacity must be >= 0");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(b.message(), "x");
    }

    // -- CacheError -------------------------------------------------------

    #[test]
    fn unsupported_policy_names_the_policy() {
        let err = CacheError::UnsupportedPolicy("clock".to_string());
        assert_eq!(err.to_string(), "unsupported eviction policy `clock`");
        assert!(err.source().is_none());
    }

    #[test]
    fn invalid_config_wraps_source() {
        let err: CacheError = ConfigError::new("bad capacity").into();
        assert_eq!(err.to_string(), "invalid configuration: bad capacity");
        let source = err.source().expect("config error source");
        assert_eq!(source.to_string(), "bad capacity");
    }

    #[test]
    fn cache_error_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<CacheError>();
    }
}
