//! Eviction policy selection.
//!
//! The set of policies is closed: [`CachePolicy`] is a plain enum and the
//! engine dispatches on it with a `match`. Two structural families back the
//! three policies:
//!
//! | Policy | Structure | Promotion on hit | Victim |
//! |--------|-----------|------------------|--------|
//! | `LeastFrequentlyUsed` | indexed min-heap | access count + 1 | lowest count, oldest insertion among ties |
//! | `LeastRecentlyUsed` | recency list | move to front | back of the list |
//! | `MostRecentlyUsed` | recency list | move to front | front of the list |
//!
//! ## Parsing
//!
//! Policy names coming from configuration are parsed case-insensitively and
//! ignore `-` and `_`, so `"LRU"`, `"least_recently_used"` and
//! `"LeastRecentlyUsed"` are the same policy. Text that is not a plain
//! identifier is rejected as malformed; an identifier that names no known
//! policy is reported as [`CacheError::UnsupportedPolicy`].
//!
//! ```
//! use tunecache::policy::CachePolicy;
//!
//! let policy: CachePolicy = "most-recently-used".parse().unwrap();
//! assert_eq!(policy, CachePolicy::MostRecentlyUsed);
//! assert_eq!(policy.to_string(), "mru");
//! assert!("arc".parse::<CachePolicy>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, ConfigError};

/// Available eviction policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Evict the entry with the fewest successful lookups.
    #[serde(alias = "lfu")]
    LeastFrequentlyUsed,
    /// Evict the entry touched longest ago.
    #[default]
    #[serde(alias = "lru")]
    LeastRecentlyUsed,
    /// Evict the entry touched most recently.
    #[serde(alias = "mru")]
    MostRecentlyUsed,
}

impl CachePolicy {
    pub const ALL: [CachePolicy; 3] = [
        CachePolicy::LeastFrequentlyUsed,
        CachePolicy::LeastRecentlyUsed,
        CachePolicy::MostRecentlyUsed,
    ];

    /// Short lowercase name, also accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            CachePolicy::LeastFrequentlyUsed => "lfu",
            CachePolicy::LeastRecentlyUsed => "lru",
            CachePolicy::MostRecentlyUsed => "mru",
        }
    }

    /// Returns `true` for the policies backed by the recency list.
    pub fn is_recency_based(self) -> bool {
        !matches!(self, CachePolicy::LeastFrequentlyUsed)
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CachePolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::new("policy name is empty").into());
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::new(format!("malformed policy name `{trimmed}`")).into());
        }

        let normalized: String = trimmed
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "lfu" | "leastfrequentlyused" => Ok(CachePolicy::LeastFrequentlyUsed),
            "lru" | "leastrecentlyused" => Ok(CachePolicy::LeastRecentlyUsed),
            "mru" | "mostrecentlyused" => Ok(CachePolicy::MostRecentlyUsed),
            _ => Err(CacheError::UnsupportedPolicy(trimmed.to_string())),
        }
    }
}
