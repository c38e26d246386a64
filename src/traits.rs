//! # Eviction Strategy Trait
//!
//! The engine owns the key index; a strategy owns the entries and decides
//! which one leaves when the cache is full. The two sides meet only through
//! [`SlotId`] handles: the strategy hands one out on insert, the engine
//! stores it in its index and passes it back for promotion.
//!
//! ```text
//!   TunableCache
//!   ┌──────────────────────────────┐        ┌──────────────────────────────┐
//!   │ index: FxHashMap<K, SlotId>  │──id───►│ EvictionStrategy<K, V>       │
//!   │                              │        │                              │
//!   │ put  ─────────── insert ─────┼───────►│  insert(K, V) → SlotId       │
//!   │ get  ─────────── promote ────┼───────►│  promote(SlotId) → &mut V    │
//!   │ put (full) ───── evict ──────┼───────►│  evict() → (K, V)            │
//!   │                              │◄───────┼  key_of(SlotId) → &K         │
//!   └──────────────────────────────┘        └──────────────────────────────┘
//!                                            │                  │
//!                                            ▼                  ▼
//!                                  FrequencyStrategy     RecencyStrategy
//!                                  (indexed min-heap)    (intrusive list,
//!                                                         LRU or MRU end)
//! ```
//!
//! Handles are generational: once an entry is evicted its handle never
//! resolves again, so an index that forgot to drop a key would be caught by
//! `key_of` returning `None` instead of aliasing a newer entry.

use crate::ds::SlotId;
use crate::error::InvariantError;

/// Storage and victim selection for one family of eviction policies.
pub trait EvictionStrategy<K, V> {
    /// Stores a new entry and returns its handle. Never evicts.
    fn insert(&mut self, key: K, value: V) -> SlotId;

    /// Applies the policy's read-side bookkeeping to `id` and returns the
    /// value. Returns `None` for a stale handle.
    fn promote(&mut self, id: SlotId) -> Option<&mut V>;

    /// Removes and returns the entry the policy picks as victim.
    fn evict(&mut self) -> Option<(K, V)>;

    /// Returns the key `evict` would remove next, without removing it.
    fn peek_victim(&self) -> Option<&K>;

    /// Returns the key stored under `id`, if the handle is live.
    fn key_of(&self, id: SlotId) -> Option<&K>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Verifies the strategy's internal structure.
    fn check_invariants(&self) -> Result<(), InvariantError>;
}
