use std::collections::HashMap;

use collections::{HashTable, Inserted, resolve};
use proptest::prelude::*;

fn add(old: u32, new: u32) -> u32 {
    old.wrapping_add(new)
}

fn key_strategy() -> impl Strategy<Value = Vec<u8>> {
    // short keys over a small alphabet, so collisions and prefixes show up often
    proptest::collection::vec(prop_oneof![Just(b'a'), Just(b'b'), Just(0xffu8)], 0..4)
}

// Model the table with a std HashMap and check they agree after every step.
proptest! {
    #[test]
    fn prop_matches_hashmap_model(
        size in 1usize..8,
        ops in proptest::collection::vec((0u8..3u8, key_strategy(), any::<u32>()), 1..200),
    ) {
        let mut table: HashTable<Vec<u8>, u32> = HashTable::new(size);
        let mut model: HashMap<Vec<u8>, u32> = HashMap::new();

        for (op, key, value) in ops {
            match op {
                // insert, merging by addition
                0 => {
                    let expected = if model.contains_key(&key) { Inserted::Merged } else { Inserted::Appended };
                    prop_assert_eq!(table.insert(key.clone(), value, add), expected);
                    model.entry(key.clone()).and_modify(|v| *v = add(*v, value)).or_insert(value);
                }
                // remove
                1 => {
                    prop_assert_eq!(table.remove(&key), model.remove(&key));
                }
                // lookup
                2 => {
                    prop_assert_eq!(table.get(&key), model.get(&key));
                }
                _ => unreachable!(),
            }

            prop_assert_eq!(table.get(&key), model.get(&key));
            prop_assert_eq!(table.len(), model.len());
        }

        // every entry sits in the bucket its key hashes to
        for slot in 0..size {
            let expected = model.keys().filter(|k| table.slot_of(*k) == slot).count();
            prop_assert_eq!(table.chain_len(slot), Some(expected));
        }

        let mut visited = 0;
        table.iterate(|k, v| {
            visited += 1;
            assert_eq!(model.get(k), Some(v));
        });
        prop_assert_eq!(visited, model.len());
    }

    #[test]
    fn prop_destroy_releases_each_value_once(
        size in 1usize..6,
        keys in proptest::collection::hash_set(key_strategy(), 0..20),
    ) {
        let mut table = HashTable::new(size);
        for (i, key) in keys.iter().enumerate() {
            table.insert(key.as_slice(), i, resolve::overwrite);
        }

        let mut released = vec![0u32; keys.len()];
        table.destroy(|i| released[i] += 1);
        prop_assert!(released.iter().all(|&n| n == 1));
    }

    #[test]
    fn prop_insert_remove_get_round_trip(size in 1usize..16, key in key_strategy(), value in any::<u32>()) {
        let mut table = HashTable::new(size);
        table.insert(key.clone(), value, resolve::keep);
        prop_assert_eq!(table.get(&key), Some(&value));
        prop_assert!(table.remove_with(&key, drop));
        prop_assert_eq!(table.get(&key), None);
        prop_assert!(table.is_empty());
    }
}

#[test]
fn never_inserted_keys_are_not_found() {
    let mut table = HashTable::new(7);
    for i in 0..50 {
        table.insert(format!("present-{i}"), i, resolve::overwrite);
    }
    for i in 0..50 {
        assert_eq!(table.get(&format!("absent-{i}")), None);
    }
}

#[test]
fn keep_resolver_ignores_later_values() {
    let mut table = HashTable::new(2);
    table.insert("k", "first", resolve::keep);
    table.insert("k", "second", resolve::keep);
    assert_eq!(table.get("k"), Some(&"first"));
    assert_eq!(table.len(), 1);
}
