//! Test that keys survive serialization, except for the highest flag.

use crate::layout::{IndexKey, Layout};
use crate::number::{NonUniqueNumberLayout, NumberIndexLayout, NumberKey, UniqueNumberLayout};
use crate::testing::KeyGenerator;

fn check_round_trip<L: Layout<Key = NumberKey>>(layout: &L, seed: u64) {
    let mut generator = KeyGenerator::new(seed);
    let mut buf = vec![0u8; layout.key_size()];
    let mut restored = layout.new_key();

    for _ in 0..500 {
        let key = generator.next_populated_key();
        layout.write_key(&key, &mut buf);
        layout.read_key(&buf, &mut restored);

        assert_eq!(restored.value.to_bits(), key.value.to_bits(), "{key}");
        assert_eq!(restored.entity_id, key.entity_id, "{key}");
        assert!(!restored.is_highest);
    }
}

#[test]
fn test_unique_round_trip() {
    check_round_trip(&UniqueNumberLayout::new(), 0x0417_0001);
}

#[test]
fn test_non_unique_round_trip() {
    check_round_trip(&NonUniqueNumberLayout::new(), 0x0417_0002);
}

#[test]
fn test_fixed_width() {
    let mut generator = KeyGenerator::new(0x0417_0003);
    for layout in [NumberIndexLayout::unique(), NumberIndexLayout::non_unique()] {
        assert_eq!(layout.key_size(), 16);
        for key in generator.keys(100) {
            assert_eq!(layout.serialize_key(&key).len(), layout.key_size());
        }
    }
}

#[test]
fn test_highest_round_trip_drops_flag() {
    let layout = UniqueNumberLayout::new();
    let mut highest = NumberKey::default();
    highest.init_as_highest();

    let restored = layout.deserialize_key(&layout.serialize_key(&highest));

    assert_eq!(restored.value, f64::INFINITY);
    assert_eq!(restored.entity_id, i64::MAX);
    assert!(!restored.is_highest);
}

#[test]
fn test_highest_serializes_like_stored_infinity() {
    let layout = NonUniqueNumberLayout::new();
    let mut highest = NumberKey::default();
    highest.init_as_highest();
    let stored = NumberKey {
        value: f64::INFINITY,
        entity_id: i64::MAX,
        is_highest: false,
    };

    assert_eq!(layout.serialize_key(&highest), layout.serialize_key(&stored));
}

#[test]
fn test_lowest_round_trip() {
    let layout = NonUniqueNumberLayout::new();
    let mut lowest = NumberKey::default();
    lowest.init_as_lowest();

    let restored = layout.deserialize_key(&layout.serialize_key(&lowest));
    assert_eq!(restored, lowest);
}
