// Property tests run against both maps through the shared StringMap operations.
//
// Property 1: model equivalence with std HashMap.
//  - Operations: put, remove, get, resize, clear over a small key space so
//    updates, collisions and tombstone reuse all happen.
//  - Invariant after each step: len() == model.len(); every key in the key
//    space maps to the same value; table_load() == len() / capacity();
//    capacity() is prime.
//
// Property 2: growth bound.
//  - Right after a put, at most one entry sits above the load ceiling:
//    open addressing keeps 2 * (len - 1) < capacity, chaining len - 1 < capacity.
//
// Property 3: resize floors leave the map untouched.
use std::collections::HashMap;

use primemap::{
    ChainedMap, OpenAddressingMap, StringMap,
    hashing::{additive_hash, positional_hash},
    prime::is_prime,
};
use proptest::prelude::*;

const KEY_SPACE: usize = 24;

fn key_of(index: usize) -> String {
    format!("k{}", index % KEY_SPACE)
}

fn check_against_model<M: StringMap<u32>>(
    map: &mut M,
    ops: &[(u8, usize, u32)],
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, u32> = HashMap::new();

    for &(op, raw_key, value) in ops {
        let key = key_of(raw_key);
        match op {
            // Insert or update
            0..=3 => {
                let previous = map.put(key.clone(), value).unwrap();
                prop_assert_eq!(previous, model.insert(key, value));
            }
            // Remove, sometimes twice in a row
            4 | 5 => {
                prop_assert_eq!(map.remove(&key), model.remove(&key));
                if op == 5 {
                    prop_assert_eq!(map.remove(&key), None);
                }
            }
            // Resize to an arbitrary request
            6 => {
                map.resize(raw_key % 64).unwrap();
            }
            // Clear keeps the capacity
            _ => {
                let capacity = map.capacity();
                map.clear();
                model.clear();
                prop_assert_eq!(map.capacity(), capacity);
            }
        }

        prop_assert_eq!(map.len(), model.len());
        prop_assert!(is_prime(map.capacity()));
        #[allow(clippy::cast_precision_loss)]
        let expected_load = map.len() as f64 / map.capacity() as f64;
        prop_assert!((map.table_load() - expected_load).abs() < f64::EPSILON);
        for index in 0..KEY_SPACE {
            let probe = key_of(index);
            prop_assert_eq!(map.get(&probe), model.get(&probe));
            prop_assert_eq!(map.contains_key(&probe), model.contains_key(&probe));
        }
    }

    let mut entries = map.keys_and_values();
    entries.sort();
    let mut expected: Vec<(String, u32)> = model.into_iter().collect();
    expected.sort();
    prop_assert_eq!(entries, expected);
    Ok(())
}

fn op_strategy() -> impl Strategy<Value = Vec<(u8, usize, u32)>> {
    proptest::collection::vec((0u8..=7u8, 0usize..200usize, any::<u32>()), 1..200)
}

proptest! {
    #[test]
    fn prop_open_addressing_matches_model(capacity in 0usize..20, ops in op_strategy()) {
        let mut map = OpenAddressingMap::with_capacity_and_hasher(capacity, additive_hash).unwrap();
        check_against_model(&mut map, &ops)?;
    }

    #[test]
    fn prop_open_addressing_constant_hash_matches_model(ops in op_strategy()) {
        let mut map = OpenAddressingMap::with_capacity_and_hasher(5, |_: &str| 7).unwrap();
        check_against_model(&mut map, &ops)?;
    }

    #[test]
    fn prop_chained_matches_model(capacity in 0usize..20, ops in op_strategy()) {
        let mut map = ChainedMap::with_capacity_and_hasher(capacity, positional_hash).unwrap();
        check_against_model(&mut map, &ops)?;
    }

    #[test]
    fn prop_chained_constant_hash_matches_model(ops in op_strategy()) {
        let mut map = ChainedMap::with_capacity_and_hasher(5, |_: &str| 7).unwrap();
        check_against_model(&mut map, &ops)?;
    }
}

proptest! {
    #[test]
    fn prop_growth_keeps_load_bound(keys in proptest::collection::vec("[a-z]{1,6}", 1..300)) {
        let mut open = OpenAddressingMap::with_capacity_and_hasher(3, additive_hash).unwrap();
        let mut chained = ChainedMap::with_capacity_and_hasher(3, additive_hash).unwrap();

        for key in keys {
            open.put(key.clone(), ()).unwrap();
            chained.put(key, ()).unwrap();

            prop_assert!(2 * (open.len() - 1) < open.capacity());
            prop_assert!(chained.len() - 1 < chained.capacity());
            prop_assert_eq!(open.len(), chained.len());
        }
    }

    #[test]
    fn prop_resize_floors_are_noops(keys in proptest::collection::btree_set("[a-z]{1,4}", 2..40)) {
        let mut open = OpenAddressingMap::new();
        let mut chained = ChainedMap::new();
        for key in &keys {
            open.put(key.clone(), key.len()).unwrap();
            chained.put(key.clone(), key.len()).unwrap();
        }

        let capacity = open.capacity();
        open.resize(keys.len() - 1).unwrap();
        prop_assert_eq!(open.capacity(), capacity);

        let capacity = chained.capacity();
        chained.resize(0).unwrap();
        prop_assert_eq!(chained.capacity(), capacity);

        for key in &keys {
            prop_assert_eq!(open.get(key), Some(&key.len()));
            prop_assert_eq!(chained.get(key), Some(&key.len()));
        }
    }

    #[test]
    fn prop_resize_preserves_entries(
        keys in proptest::collection::btree_set("[a-z]{1,5}", 0..60),
        request in 0usize..500,
    ) {
        let mut open = OpenAddressingMap::with_capacity_and_hasher(7, positional_hash).unwrap();
        let mut chained = ChainedMap::with_capacity_and_hasher(7, positional_hash).unwrap();
        for key in &keys {
            open.put(key.clone(), key.clone()).unwrap();
            chained.put(key.clone(), key.clone()).unwrap();
        }

        open.resize(request).unwrap();
        if request >= keys.len() {
            prop_assert!(open.capacity() >= request);
        }
        chained.resize(request).unwrap();
        if request >= 1 {
            prop_assert!(chained.capacity() >= request);
        }
        prop_assert!(is_prime(open.capacity()));
        prop_assert!(is_prime(chained.capacity()));

        for key in &keys {
            prop_assert_eq!(open.get(key), Some(key));
            prop_assert_eq!(chained.get(key), Some(key));
        }
        prop_assert_eq!(open.len(), keys.len());
        prop_assert_eq!(chained.len(), keys.len());
    }
}
