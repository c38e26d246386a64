//! Recency strategy shared by LRU and MRU.
//!
//! Both policies keep entries in one [`IntrusiveList`] ordered by last
//! touch: a new entry goes to the front and a hit moves its entry to the
//! front. They differ only in which end gives up the victim.
//!
//! ```text
//!   front (most recent)                              back (least recent)
//!   ┌──────┐    ┌──────┐    ┌──────┐    ┌──────┐
//!   │  d   │◄──►│  a   │◄──►│  c   │◄──►│  b   │
//!   └──────┘    └──────┘    └──────┘    └──────┘
//!      ▲                                    ▲
//!      │ MRU victim                         │ LRU victim
//! ```
//!
//! Promotion relinks the node in place, so the [`SlotId`] stored in the
//! engine's index never changes while the entry is resident.

use crate::ds::{IntrusiveList, SlotId};
use crate::error::InvariantError;
use crate::traits::EvictionStrategy;

#[derive(Debug)]
struct RecencyEntry<K, V> {
    key: K,
    value: V,
}

/// End of the recency list that supplies the victim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VictimEnd {
    LeastRecent,
    MostRecent,
}

/// LRU/MRU storage over an intrusive recency list.
#[derive(Debug)]
pub struct RecencyStrategy<K, V> {
    list: IntrusiveList<RecencyEntry<K, V>>,
    victim_end: VictimEnd,
}

impl<K, V> RecencyStrategy<K, V> {
    pub fn new(victim_end: VictimEnd, capacity: usize) -> Self {
        Self {
            list: IntrusiveList::with_capacity(capacity),
            victim_end,
        }
    }

    pub fn lru(capacity: usize) -> Self {
        Self::new(VictimEnd::LeastRecent, capacity)
    }

    pub fn mru(capacity: usize) -> Self {
        Self::new(VictimEnd::MostRecent, capacity)
    }

    pub fn victim_end(&self) -> VictimEnd {
        self.victim_end
    }

    /// Keys from most to least recently touched.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.list.iter().map(|entry| &entry.key)
    }
}

impl<K, V> EvictionStrategy<K, V> for RecencyStrategy<K, V> {
    fn insert(&mut self, key: K, value: V) -> SlotId {
        self.list.push_front(RecencyEntry { key, value })
    }

    fn promote(&mut self, id: SlotId) -> Option<&mut V> {
        if !self.list.move_to_front(id) {
            return None;
        }
        self.list.get_mut(id).map(|entry| &mut entry.value)
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let entry = match self.victim_end {
            VictimEnd::LeastRecent => self.list.pop_back(),
            VictimEnd::MostRecent => self.list.pop_front(),
        }?;
        Some((entry.key, entry.value))
    }

    fn peek_victim(&self) -> Option<&K> {
        let entry = match self.victim_end {
            VictimEnd::LeastRecent => self.list.back(),
            VictimEnd::MostRecent => self.list.front(),
        }?;
        Some(&entry.key)
    }

    fn key_of(&self, id: SlotId) -> Option<&K> {
        self.list.get(id).map(|entry| &entry.key)
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()
    }
}
