#![no_main]

use libfuzzer_sys::fuzz_target;
use tunecache::ds::SlotArena;

// Fuzz arbitrary operation sequences on SlotArena
//
// Every handle ever issued is kept, so removed and cleared handles are
// replayed against reused slots. A stale handle must never resolve.
fuzz_target!(|data: &[u8]| {
    let mut arena: SlotArena<u32> = SlotArena::new();
    let mut all_ids = Vec::new();
    let mut live = Vec::new();

    for chunk in data.chunks_exact(2) {
        let op = chunk[0] % 5;
        let value = u32::from(chunk[1]);

        match op {
            0 => {
                let id = arena.insert(value);
                assert_eq!(arena.get(id), Some(&value));
                all_ids.push(id);
                live.push(id);
            },
            1 => {
                if !all_ids.is_empty() {
                    let id = all_ids[value as usize % all_ids.len()];
                    let was_live = live.contains(&id);
                    let old_len = arena.len();
                    let removed = arena.remove(id);
                    assert_eq!(removed.is_some(), was_live);
                    if was_live {
                        live.retain(|other| *other != id);
                        assert_eq!(arena.len(), old_len - 1);
                    }
                    assert!(!arena.contains(id));
                }
            },
            2 => {
                if !all_ids.is_empty() {
                    let id = all_ids[value as usize % all_ids.len()];
                    if let Some(slot) = arena.get_mut(id) {
                        *slot = value;
                        assert_eq!(arena.get(id), Some(&value));
                    }
                }
            },
            3 => {
                arena.clear();
                live.clear();
                assert!(arena.is_empty());
            },
            _ => {
                for id in &all_ids {
                    assert_eq!(arena.contains(*id), live.contains(id));
                }
            },
        }

        assert_eq!(arena.len(), live.len());
        assert_eq!(arena.iter().count(), live.len());
    }
});
