//! Frequency strategy: an indexed binary min-heap over access counts.
//!
//! Entries live in a [`SlotArena`]; the heap is a `Vec` of small
//! [`HeapSlot`]s that carry the ordering key next to the entry's handle, and
//! every arena entry remembers its current heap position. A swap in the heap
//! therefore updates two positions and nothing else, which is what makes an
//! in-place increase-key possible without rebuilding the heap.
//!
//! ## Architecture
//!
//! ```text
//!   heap: Vec<HeapSlot>                     arena: SlotArena<FrequencyEntry>
//!   ┌─────┬───────┬─────┬──────┐            ┌──────┬─────┬───────┬──────────┐
//!   │ pos │ count │ seq │ id   │            │ id   │ key │ value │ heap_pos │
//!   ├─────┼───────┼─────┼──────┤            ├──────┼─────┼───────┼──────────┤
//!   │  0  │   1   │  4  │ id_b │──────┐     │ id_a │  a  │  ...  │    2     │
//!   │  1  │   3   │  2  │ id_c │      └────►│ id_b │  b  │  ...  │    0     │
//!   │  2  │   5   │  1  │ id_a │            │ id_c │  c  │  ...  │    1     │
//!   └─────┴───────┴─────┴──────┘            └──────┴─────┴───────┴──────────┘
//!        root = next victim
//! ```
//!
//! ## Ordering
//!
//! Slots are ordered by `(count, seq)`. `seq` is assigned once, at insertion,
//! from a counter that only grows, so among entries with equal counts the
//! one inserted earliest is evicted first. Because `seq` is unique the order
//! is total and eviction is fully deterministic.
//!
//! ## Operations
//!
//! | Operation | Heap work | Complexity |
//! |-----------|-----------|------------|
//! | `insert`  | push + sift up | O(log n) |
//! | `promote` | count + 1, sift down | O(log n) |
//! | `evict`   | swap root with last, pop, sift down | O(log n) |
//! | `peek_victim` | read root | O(1) |

use crate::ds::{SlotArena, SlotId};
use crate::error::InvariantError;
use crate::traits::EvictionStrategy;

#[derive(Debug)]
struct FrequencyEntry<K, V> {
    key: K,
    value: V,
    heap_pos: usize,
}

#[derive(Debug, Clone, Copy)]
struct HeapSlot {
    count: u64,
    seq: u64,
    id: SlotId,
}

impl HeapSlot {
    #[inline]
    fn rank(&self) -> (u64, u64) {
        (self.count, self.seq)
    }
}

/// LFU storage: arena-held entries ordered by an indexed min-heap.
#[derive(Debug)]
pub struct FrequencyStrategy<K, V> {
    arena: SlotArena<FrequencyEntry<K, V>>,
    heap: Vec<HeapSlot>,
    next_seq: u64,
}

impl<K, V> FrequencyStrategy<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            heap: Vec::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Current access count of the entry under `id`.
    pub fn frequency(&self, id: SlotId) -> Option<u64> {
        let entry = self.arena.get(id)?;
        self.heap.get(entry.heap_pos).map(|slot| slot.count)
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.sync_position(a);
        self.sync_position(b);
    }

    fn sync_position(&mut self, pos: usize) {
        let id = self.heap[pos].id;
        if let Some(entry) = self.arena.get_mut(id) {
            entry.heap_pos = pos;
        }
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.heap[parent].rank() <= self.heap[pos].rank() {
                break;
            }
            self.swap_slots(parent, pos);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;

            if left < len && self.heap[left].rank() < self.heap[smallest].rank() {
                smallest = left;
            }
            if right < len && self.heap[right].rank() < self.heap[smallest].rank() {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap_slots(pos, smallest);
            pos = smallest;
        }
    }
}

impl<K, V> Default for FrequencyStrategy<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> EvictionStrategy<K, V> for FrequencyStrategy<K, V> {
    fn insert(&mut self, key: K, value: V) -> SlotId {
        let pos = self.heap.len();
        let id = self.arena.insert(FrequencyEntry {
            key,
            value,
            heap_pos: pos,
        });
        self.heap.push(HeapSlot {
            count: 1,
            seq: self.next_seq,
            id,
        });
        self.next_seq += 1;
        self.sift_up(pos);
        id
    }

    fn promote(&mut self, id: SlotId) -> Option<&mut V> {
        let pos = self.arena.get(id)?.heap_pos;
        let slot = self.heap.get_mut(pos)?;
        slot.count = slot.count.saturating_add(1);
        // The key only grows, so the entry can only move towards the leaves.
        self.sift_down(pos);
        self.arena.get_mut(id).map(|entry| &mut entry.value)
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap_slots(0, last);
        let victim = self.heap.pop()?;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        self.arena
            .remove(victim.id)
            .map(|entry| (entry.key, entry.value))
    }

    fn peek_victim(&self) -> Option<&K> {
        let root = self.heap.first()?;
        self.arena.get(root.id).map(|entry| &entry.key)
    }

    fn key_of(&self, id: SlotId) -> Option<&K> {
        self.arena.get(id).map(|entry| &entry.key)
    }

    fn len(&self) -> usize {
        self.arena.len()
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.heap.len() != self.arena.len() {
            return Err(InvariantError::new(format!(
                "heap holds {} slots but arena holds {} entries",
                self.heap.len(),
                self.arena.len()
            )));
        }
        for (pos, slot) in self.heap.iter().enumerate() {
            let entry = self
                .arena
                .get(slot.id)
                .ok_or_else(|| InvariantError::new(format!("heap slot {pos} has a stale handle")))?;
            if entry.heap_pos != pos {
                return Err(InvariantError::new(format!(
                    "entry at heap slot {pos} records position {}",
                    entry.heap_pos
                )));
            }
            if slot.count == 0 {
                return Err(InvariantError::new(format!("heap slot {pos} has count 0")));
            }
            if pos > 0 {
                let parent = (pos - 1) / 2;
                if self.heap[parent].rank() > slot.rank() {
                    return Err(InvariantError::new(format!(
                        "heap order violated between slots {parent} and {pos}"
                    )));
                }
            }
            if slot.seq >= self.next_seq {
                return Err(InvariantError::new(format!(
                    "heap slot {pos} has a sequence number from the future"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<K, V>(strategy: &mut FrequencyStrategy<K, V>) -> Vec<K> {
        std::iter::from_fn(|| strategy.evict().map(|(k, _)| k)).collect()
    }

    #[test]
    fn new_entries_start_at_one() {
        let mut s = FrequencyStrategy::new();
        let id = s.insert("a", 1);
        assert_eq!(s.frequency(id), Some(1));
        assert_eq!(s.len(), 1);
        s.check_invariants().unwrap();
    }

    #[test]
    fn promote_increments_and_returns_value() {
        let mut s = FrequencyStrategy::new();
        let id = s.insert("a", 10);
        if let Some(value) = s.promote(id) {
            *value += 1;
        }
        assert_eq!(s.frequency(id), Some(2));
        assert_eq!(s.promote(id).copied(), Some(11));
        assert_eq!(s.frequency(id), Some(3));
        s.check_invariants().unwrap();
    }

    #[test]
    fn evicts_lowest_count_first() {
        let mut s = FrequencyStrategy::new();
        let a = s.insert("a", ());
        let b = s.insert("b", ());
        let c = s.insert("c", ());
        for _ in 0..3 {
            s.promote(a);
        }
        s.promote(c);
        assert_eq!(s.peek_victim(), Some(&"b"));
        assert_eq!(drain(&mut s), vec!["b", "c", "a"]);
        assert!(s.key_of(b).is_none());
    }

    #[test]
    fn ties_go_to_earliest_insertion() {
        let mut s = FrequencyStrategy::new();
        let ids: Vec<_> = (0..6).map(|k| s.insert(k, ())).collect();
        // Everyone at count 2; insertion order must decide.
        for &id in ids.iter().rev() {
            s.promote(id);
        }
        s.check_invariants().unwrap();
        assert_eq!(drain(&mut s), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn stale_handle_is_ignored() {
        let mut s = FrequencyStrategy::new();
        let a = s.insert("a", 1);
        assert_eq!(s.evict(), Some(("a", 1)));
        let b = s.insert("b", 2);
        assert!(s.promote(a).is_none());
        assert_eq!(s.frequency(a), None);
        assert_eq!(s.key_of(b), Some(&"b"));
        assert_eq!(s.frequency(b), Some(1));
        s.check_invariants().unwrap();
    }

    #[test]
    fn positions_stay_consistent_under_churn() {
        let mut s = FrequencyStrategy::with_capacity(16);
        let mut ids = Vec::new();
        for k in 0..32u32 {
            ids.push(s.insert(k, k));
            if k % 3 == 0 {
                for &id in &ids {
                    s.promote(id);
                }
            }
            if s.len() > 8 {
                s.evict();
            }
            s.check_invariants().unwrap();
        }
        assert_eq!(s.len(), 8);
    }

    #[test]
    fn evict_on_empty_is_none() {
        let mut s: FrequencyStrategy<u8, u8> = FrequencyStrategy::default();
        assert!(s.evict().is_none());
        assert!(s.peek_victim().is_none());
        assert!(s.is_empty());
    }
}
