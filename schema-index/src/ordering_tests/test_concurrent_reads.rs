//! Test that many readers can search one leaf concurrently.

use std::cmp::Ordering;
use std::thread;

use crate::layout::{IndexKey, Layout};
use crate::number::{NonUniqueNumberLayout, NumberKey, NumberValue};
use crate::testing::{KeyGenerator, Leaf};
use crate::types::Value;

const READERS: u64 = 8;

fn build_leaf() -> Leaf<NonUniqueNumberLayout> {
    let mut leaf = Leaf::new(NonUniqueNumberLayout::new(), 256);
    let mut key = NumberKey::default();
    let mut value = NumberValue::default();

    for entity_id in 0..200i64 {
        let values = [Value::Long(entity_id % 17)];
        key.populate_from(entity_id, &values).expect("valid input");
        value.populate_from(&values).expect("valid input");
        leaf.insert(&key, &value).expect("insert");
    }
    leaf
}

#[test]
fn test_concurrent_scans_agree() {
    let leaf = build_leaf();
    let leaf = &leaf;

    let results: Vec<Vec<(u64, i64)>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..READERS)
            .map(|_| {
                scope.spawn(move || {
                    let mut lowest = NumberKey::default();
                    lowest.init_as_lowest();
                    let mut highest = NumberKey::default();
                    highest.init_as_highest();

                    let mut cursor = leaf.range(&lowest, &highest);
                    let mut seen = Vec::new();
                    while let Some((key, _)) = cursor.next_entry() {
                        seen.push((key.value.to_bits(), key.entity_id));
                    }
                    seen
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("reader panicked"))
            .collect()
    });

    assert_eq!(results[0].len(), 200);
    for result in &results[1..] {
        assert_eq!(result, &results[0]);
    }
}

#[test]
fn test_concurrent_seeks_with_own_scratch_keys() {
    let leaf = build_leaf();

    thread::scope(|scope| {
        for reader in 0..READERS {
            let leaf = &leaf;
            scope.spawn(move || {
                let mut generator = KeyGenerator::new(0xC0C0_0000 + reader);
                let mut scratch = NumberKey::default();
                let mut found = NumberKey::default();

                for _ in 0..200 {
                    let probe = generator.next_key();
                    let index = leaf.seek(&probe, &mut scratch);

                    if index > 0 {
                        leaf.read_key_at(index - 1, &mut found);
                        assert_eq!(leaf.layout().compare(&found, &probe), Ordering::Less);
                    }
                    if index < leaf.len() {
                        leaf.read_key_at(index, &mut found);
                        assert_ne!(leaf.layout().compare(&found, &probe), Ordering::Less);
                    }
                }
            });
        }
    });
}
