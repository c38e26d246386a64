#![no_main]

use libfuzzer_sys::fuzz_target;
use tunecache::ds::SlotId;
use tunecache::strategy::FrequencyStrategy;
use tunecache::traits::EvictionStrategy;

// Fuzz arbitrary operation sequences on FrequencyStrategy
//
// Tracks (id, count, insertion order) per live entry and checks that every
// eviction takes the minimum count, oldest insertion first.
fuzz_target!(|data: &[u8]| {
    let mut strategy: FrequencyStrategy<u32, ()> = FrequencyStrategy::new();
    let mut model: Vec<(SlotId, u64, u32)> = Vec::new();
    let mut next_key = 0u32;

    for chunk in data.chunks_exact(2) {
        let op = chunk[0] % 3;
        let arg = chunk[1] as usize;

        match op {
            0 => {
                let id = strategy.insert(next_key, ());
                model.push((id, 1, next_key));
                next_key += 1;
            },
            1 => {
                if !model.is_empty() {
                    let pos = arg % model.len();
                    assert!(strategy.promote(model[pos].0).is_some());
                    model[pos].1 += 1;
                }
            },
            _ => {
                let expected = model
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, (_, count, key))| (*count, *key))
                    .map(|(pos, _)| pos);
                let evicted = strategy.evict().map(|(key, _)| key);
                match expected {
                    Some(pos) => {
                        let (_, _, key) = model.remove(pos);
                        assert_eq!(evicted, Some(key));
                    },
                    None => assert_eq!(evicted, None),
                }
            },
        }

        assert!(strategy.check_invariants().is_ok());
        assert_eq!(strategy.len(), model.len());
        for (id, count, _) in &model {
            assert_eq!(strategy.frequency(*id), Some(*count));
        }
    }
});
