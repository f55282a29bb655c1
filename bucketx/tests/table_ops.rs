//! End-to-end checks for the table's core operation contracts

use bucketx::{ChainTable, ChainTableBuilder, Error};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

#[test]
fn fresh_table_has_no_mappings() {
    let table: ChainTable<u64> = ChainTable::new(8).unwrap();
    for key in 0..100 {
        assert_eq!(table.get(key), None);
    }
    assert_eq!(table.len(), 0);
    assert!(table.is_empty());
    assert_eq!(table.num_buckets(), 8);
}

#[test]
fn insert_then_get() {
    let mut table = ChainTable::new(8).unwrap();
    assert_eq!(table.insert(42, "answer"), None);
    assert_eq!(table.get(42), Some(&"answer"));
    assert!(table.contains_key(42));
    assert_eq!(table.len(), 1);
}

#[test]
fn overwrite_returns_previous_value() {
    let mut table = ChainTable::new(8).unwrap();
    assert_eq!(table.insert(7, "first"), None);
    assert_eq!(table.insert(7, "second"), Some("first"));
    assert_eq!(table.get(7), Some(&"second"));
    // Overwrite mutates in place; no second entry appears.
    assert_eq!(table.len(), 1);
}

#[test]
fn remove_returns_value_and_clears_mapping() {
    let mut table = ChainTable::new(8).unwrap();
    table.insert(1, "one");
    table.insert(2, "two");
    assert_eq!(table.remove(1), Some("one"));
    assert_eq!(table.get(1), None);
    assert_eq!(table.get(2), Some(&"two"));
    assert_eq!(table.len(), 1);
}

#[test]
fn remove_of_absent_key_is_a_noop() {
    let mut table = ChainTable::new(4).unwrap();
    table.insert(10, "ten");
    table.insert(11, "eleven");
    assert_eq!(table.remove(99), None);
    assert_eq!(table.get(10), Some(&"ten"));
    assert_eq!(table.get(11), Some(&"eleven"));
    assert_eq!(table.len(), 2);
}

#[test]
fn bulk_insert_then_remove_all() {
    const N: u32 = 1000;
    let mut table = ChainTable::new(64).unwrap();
    for key in 0..N {
        assert_eq!(table.insert(key, u64::from(key) * 10), None);
    }
    assert_eq!(table.len(), N as usize);

    // Each value comes back exactly once across the N removals.
    let mut removed: Vec<u64> = (0..N)
        .map(|key| table.remove(key).expect("every inserted key is removable"))
        .collect();
    removed.sort_unstable();
    let expected: Vec<u64> = (0..N).map(|key| u64::from(key) * 10).collect();
    assert_eq!(removed, expected);

    assert!(table.is_empty());
    for key in 0..N {
        assert_eq!(table.get(key), None);
    }
}

#[test]
fn get_mut_updates_in_place() {
    let mut table = ChainTable::new(8).unwrap();
    table.insert(5, 100u64);
    *table.get_mut(5).unwrap() += 1;
    assert_eq!(table.get(5), Some(&101));
    assert_eq!(table.get_mut(6), None);
}

#[test]
fn clear_keeps_bucket_count() {
    let mut table = ChainTable::new(4).unwrap();
    for key in 0..50 {
        table.insert(key, key);
    }
    table.clear();
    assert!(table.is_empty());
    assert_eq!(table.num_buckets(), 4);
    for key in 0..50 {
        assert_eq!(table.get(key), None);
    }
    // The cleared table is still fully usable.
    table.insert(1, 1);
    assert_eq!(table.get(1), Some(&1));
}

#[test]
fn zero_buckets_is_a_construction_error() {
    assert!(matches!(ChainTable::<u64>::new(0), Err(Error::ZeroBuckets)));
    assert!(matches!(
        ChainTableBuilder::new().buckets(0).build::<u64>(),
        Err(Error::ZeroBuckets)
    ));
}

#[test]
fn builder_defaults() {
    let table = ChainTableBuilder::new().build::<u8>().unwrap();
    assert_eq!(table.num_buckets(), ChainTableBuilder::DEFAULT_BUCKETS);
    assert!(table.is_empty());
}

#[test]
fn stored_empty_values_are_still_present() {
    // A mapping to an "empty" value is not the same thing as no mapping.
    let mut table: ChainTable<Option<&str>> = ChainTable::new(4).unwrap();
    table.insert(1, None);
    assert_eq!(table.get(1), Some(&None));
    assert_eq!(table.get(2), None);
    assert!(table.contains_key(1));
    assert!(!table.contains_key(2));
}

#[test]
fn single_bucket_table_works() {
    let mut table = ChainTable::new(1).unwrap();
    for key in 0..20 {
        table.insert(key, key * 2);
    }
    for key in 0..20 {
        assert_eq!(table.get(key), Some(&(key * 2)));
    }
    assert_eq!(table.remove(10), Some(20));
    assert_eq!(table.len(), 19);
}

#[test]
fn random_workload_matches_std_hashmap() {
    let mut rng = StdRng::seed_from_u64(0x6275636b);
    let mut table: ChainTable<u64> = ChainTable::new(31).unwrap();
    let mut model: HashMap<u32, u64> = HashMap::new();

    for _ in 0..10_000 {
        let key = rng.gen_range(0..256u32);
        match rng.gen_range(0..4u8) {
            0 | 1 => {
                let value = rng.gen::<u64>();
                assert_eq!(table.insert(key, value), model.insert(key, value));
            }
            2 => assert_eq!(table.get(key), model.get(&key)),
            _ => assert_eq!(table.remove(key), model.remove(&key)),
        }
        assert_eq!(table.len(), model.len());
    }

    let mut seen: Vec<(u32, u64)> = table.iter().map(|(k, v)| (k, *v)).collect();
    seen.sort_unstable();
    let mut expected: Vec<(u32, u64)> = model.iter().map(|(k, v)| (*k, *v)).collect();
    expected.sort_unstable();
    assert_eq!(seen, expected);
}
