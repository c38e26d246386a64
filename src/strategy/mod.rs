//! Eviction strategies and the closed dispatch over them.
//!
//! [`Strategy`] is what the engine holds. Switching policy means dropping
//! the current variant and building a fresh one with
//! [`Strategy::for_policy`]; entries never migrate between variants.

pub mod frequency;
pub mod recency;

pub use frequency::FrequencyStrategy;
pub use recency::{RecencyStrategy, VictimEnd};

use crate::ds::SlotId;
use crate::error::InvariantError;
use crate::policy::CachePolicy;
use crate::traits::EvictionStrategy;

/// The active eviction structure.
#[derive(Debug)]
pub enum Strategy<K, V> {
    Frequency(FrequencyStrategy<K, V>),
    Recency(RecencyStrategy<K, V>),
}

impl<K, V> Strategy<K, V> {
    /// Builds an empty strategy for `policy`, preallocating `prealloc` slots.
    pub fn for_policy(policy: CachePolicy, prealloc: usize) -> Self {
        match policy {
            CachePolicy::LeastFrequentlyUsed => {
                Strategy::Frequency(FrequencyStrategy::with_capacity(prealloc))
            },
            CachePolicy::LeastRecentlyUsed => Strategy::Recency(RecencyStrategy::lru(prealloc)),
            CachePolicy::MostRecentlyUsed => Strategy::Recency(RecencyStrategy::mru(prealloc)),
        }
    }

    /// Access count under LFU; `None` for recency strategies.
    pub fn frequency(&self, id: SlotId) -> Option<u64> {
        match self {
            Strategy::Frequency(s) => s.frequency(id),
            Strategy::Recency(_) => None,
        }
    }

    pub fn policy(&self) -> CachePolicy {
        match self {
            Strategy::Frequency(_) => CachePolicy::LeastFrequentlyUsed,
            Strategy::Recency(s) => match s.victim_end() {
                VictimEnd::LeastRecent => CachePolicy::LeastRecentlyUsed,
                VictimEnd::MostRecent => CachePolicy::MostRecentlyUsed,
            },
        }
    }
}

impl<K, V> EvictionStrategy<K, V> for Strategy<K, V> {
    #[inline]
    fn insert(&mut self, key: K, value: V) -> SlotId {
        match self {
            Strategy::Frequency(s) => s.insert(key, value),
            Strategy::Recency(s) => s.insert(key, value),
        }
    }

    #[inline]
    fn promote(&mut self, id: SlotId) -> Option<&mut V> {
        match self {
            Strategy::Frequency(s) => s.promote(id),
            Strategy::Recency(s) => s.promote(id),
        }
    }

    #[inline]
    fn evict(&mut self) -> Option<(K, V)> {
        match self {
            Strategy::Frequency(s) => s.evict(),
            Strategy::Recency(s) => s.evict(),
        }
    }

    fn peek_victim(&self) -> Option<&K> {
        match self {
            Strategy::Frequency(s) => s.peek_victim(),
            Strategy::Recency(s) => s.peek_victim(),
        }
    }

    #[inline]
    fn key_of(&self, id: SlotId) -> Option<&K> {
        match self {
            Strategy::Frequency(s) => s.key_of(id),
            Strategy::Recency(s) => s.key_of(id),
        }
    }

    fn len(&self) -> usize {
        match self {
            Strategy::Frequency(s) => s.len(),
            Strategy::Recency(s) => s.len(),
        }
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        match self {
            Strategy::Frequency(s) => s.check_invariants(),
            Strategy::Recency(s) => s.check_invariants(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_policy_round_trips_policy() {
        for policy in CachePolicy::ALL {
            let s: Strategy<u32, u32> = Strategy::for_policy(policy, 8);
            assert_eq!(s.policy(), policy);
            assert!(s.is_empty());
        }
    }

    #[test]
    fn frequency_only_reported_for_lfu() {
        let mut lfu: Strategy<u32, ()> = Strategy::for_policy(CachePolicy::LeastFrequentlyUsed, 0);
        let id = lfu.insert(1, ());
        lfu.promote(id);
        assert_eq!(lfu.frequency(id), Some(2));

        let mut lru: Strategy<u32, ()> = Strategy::for_policy(CachePolicy::LeastRecentlyUsed, 0);
        let id = lru.insert(1, ());
        assert_eq!(lru.frequency(id), None);
    }
}
