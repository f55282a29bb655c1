//! Fuzzer for the public table API.
//!
//! Every operation sequence runs against a [`bucketx::ChainTable`] and a
//! `std::collections::HashMap` model at the same time, and the two must
//! never disagree.

#![no_main]
use arbitrary::Arbitrary;
use bucketx::ChainTable;
use libfuzzer_sys::fuzz_target;
use std::collections::HashMap;

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Insert(u8, u64),
    Get(u8),
    GetMut(u8, u64),
    Remove(u8),
    Delete(u8),
    Contains(u8),
    Iter,
    Clear,
}

fn run(table: &mut ChainTable<u64>, model: &mut HashMap<u32, u64>, ops: &[Op]) {
    for op in ops {
        match *op {
            Op::Insert(key, value) => {
                let key = u32::from(key);
                assert_eq!(table.insert(key, value), model.insert(key, value));
            }
            Op::Get(key) => {
                let key = u32::from(key);
                assert_eq!(table.get(key), model.get(&key));
            }
            Op::GetMut(key, value) => {
                let key = u32::from(key);
                let updated = match table.get_mut(key) {
                    Some(slot) => {
                        *slot = value;
                        true
                    }
                    None => false,
                };
                match model.get_mut(&key) {
                    Some(slot) => {
                        assert!(updated);
                        *slot = value;
                    }
                    None => assert!(!updated),
                }
            }
            Op::Remove(key) => {
                let key = u32::from(key);
                assert_eq!(table.remove(key), model.remove(&key));
            }
            Op::Delete(key) => {
                let key = u32::from(key);
                assert_eq!(table.delete(key), model.remove(&key).is_some());
            }
            Op::Contains(key) => {
                let key = u32::from(key);
                assert_eq!(table.contains_key(key), model.contains_key(&key));
            }
            Op::Iter => {
                let mut seen: Vec<(u32, u64)> = table.iter().map(|(k, v)| (k, *v)).collect();
                seen.sort_unstable();
                let mut expected: Vec<(u32, u64)> = model.iter().map(|(k, v)| (*k, *v)).collect();
                expected.sort_unstable();
                assert_eq!(seen, expected);
            }
            Op::Clear => {
                table.clear();
                model.clear();
            }
        }
        assert_eq!(table.len(), model.len());
        assert_eq!(table.is_empty(), model.is_empty());
    }
}

fuzz_target!(|ops: Vec<Op>| {
    // Run the same inputs against two table shapes, including the
    // degenerate single bucket where every key chains together.
    for buckets in [1usize, 7] {
        let mut table = ChainTable::new(buckets).expect("bucket count is non-zero");
        let mut model = HashMap::new();
        run(&mut table, &mut model, &ops);
    }
});
