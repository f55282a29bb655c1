//! Fuzzer for the "entry-arena" API.
//!
//! The arena backs every chain in the crate, so id reuse bugs here would
//! corrupt tables silently. This drives it against a simulated slot map and
//! checks ids, payloads, and live counts after every operation.

#![no_main]
use arbitrary::Arbitrary;
use bucketx::{EntryArena, EntryId};
use libfuzzer_sys::fuzz_target;
use std::collections::HashMap;

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Insert(u32, u64),
    Remove(u8),
    Get(u8),
    Update(u8, u64),
    Clear,
}

#[derive(Default)]
struct Sim {
    /// Ids the arena has issued and not yet taken back, in issue order
    live: Vec<EntryId>,
    /// Expected key/value for each live id
    model: HashMap<EntryId, (u32, u64)>,
}

impl Sim {
    /// Map a fuzzer byte onto one of the live ids, if any are live.
    fn pick(&self, raw: u8) -> Option<EntryId> {
        if self.live.is_empty() {
            None
        } else {
            Some(self.live[(raw as usize) % self.live.len()])
        }
    }

    fn apply(&mut self, arena: &mut EntryArena<u64>, op: Op) {
        match op {
            Op::Insert(key, value) => {
                let id = arena.insert(key, value, None);
                assert!(!self.model.contains_key(&id), "arena reissued a live id");
                self.live.push(id);
                self.model.insert(id, (key, value));
            }
            Op::Remove(raw) => {
                if let Some(id) = self.pick(raw) {
                    let entry = arena.remove(id);
                    let (key, value) = self.model.remove(&id).expect("picked id is live");
                    assert_eq!(entry.key(), key);
                    assert_eq!(entry.into_value(), value);
                    self.live.retain(|&live| live != id);
                }
            }
            Op::Get(raw) => {
                if let Some(id) = self.pick(raw) {
                    let entry = arena.get(id);
                    let (key, value) = self.model[&id];
                    assert_eq!(entry.key(), key);
                    assert_eq!(*entry.value(), value);
                }
            }
            Op::Update(raw, value) => {
                if let Some(id) = self.pick(raw) {
                    *arena.get_mut(id).value_mut() = value;
                    self.model.get_mut(&id).expect("picked id is live").1 = value;
                }
            }
            Op::Clear => {
                arena.clear();
                self.live.clear();
                self.model.clear();
            }
        }
        assert_eq!(arena.len(), self.live.len());
    }
}

fuzz_target!(|ops: Vec<Op>| {
    let mut arena: EntryArena<u64> = EntryArena::new();
    let mut sim = Sim::default();
    for op in ops {
        sim.apply(&mut arena, op);
    }
});
