//! Bucket chain layer
//!
//! This sits between the public table API and the entry arena. A
//! [`ChainSet`] is the fixed array of bucket heads plus every operation that
//! walks or rewrites a chain: keyed search, head insertion, and unlinking
//! with previous-entry tracking. It knows nothing about hashing; callers
//! hand it a bucket index that is already in range.
//!
//! Chains are singly linked through the arena's entry ids. New entries are
//! always prepended, so within one bucket the chain runs in reverse
//! insertion order among keys that were never removed. Within one chain all
//! keys are distinct; the table's overwrite path never reaches insertion.

use crate::arena::{Entry, EntryArena, EntryId};

/// Fixed array of bucket heads over an external entry arena
///
/// The number of buckets is set at construction and never changes. The set
/// stores ids only; the entries themselves, and the value type, live in the
/// [`EntryArena`] passed into each operation.
pub(crate) struct ChainSet {
    /// Head entry of each bucket's chain, or `None` for an empty bucket
    heads: Vec<Option<EntryId>>,
}

impl ChainSet {
    /// Create a set of `num_buckets` empty chains.
    ///
    /// Bucket count validation happens in the table builder; this layer
    /// accepts whatever length it is given.
    pub(crate) fn new(num_buckets: usize) -> Self {
        Self {
            heads: vec![None; num_buckets],
        }
    }

    /// The fixed number of buckets in this set.
    #[inline(always)]
    pub(crate) fn num_buckets(&self) -> usize {
        self.heads.len()
    }

    /// Head entry of one bucket's chain, if the bucket is non-empty.
    ///
    /// Panics if the bucket index is out of range.
    #[inline(always)]
    pub(crate) fn head(&self, bucket: usize) -> Option<EntryId> {
        self.heads[bucket]
    }

    /// Search one bucket's chain for an entry with a matching key.
    ///
    /// Linear in the chain length. Panics if the bucket index is out of
    /// range.
    pub(crate) fn find<V>(
        &self,
        arena: &EntryArena<V>,
        bucket: usize,
        key: u32,
    ) -> Option<EntryId> {
        let mut cursor = self.heads[bucket];
        while let Some(id) = cursor {
            let entry = arena.get(id);
            if entry.key() == key {
                return Some(id);
            }
            cursor = entry.next;
        }
        None
    }

    /// Link a new entry as the head of one bucket's chain.
    ///
    /// The caller must have already established that the key is absent from
    /// this chain. Returns the new entry's id.
    pub(crate) fn push_front<V>(
        &mut self,
        arena: &mut EntryArena<V>,
        bucket: usize,
        key: u32,
        value: V,
    ) -> EntryId {
        let id = arena.insert(key, value, self.heads[bucket]);
        self.heads[bucket] = Some(id);
        id
    }

    /// Unlink the entry with a matching key from one bucket's chain.
    ///
    /// Walks the chain tracking the previous entry. On a match the bucket
    /// head or the previous entry's link is rewired past the match, the
    /// slot goes back to the arena free list, and the entry is returned.
    /// Returns `None`, with the chain untouched, when the key is absent.
    pub(crate) fn unlink<V>(
        &mut self,
        arena: &mut EntryArena<V>,
        bucket: usize,
        key: u32,
    ) -> Option<Entry<V>> {
        let mut prev: Option<EntryId> = None;
        let mut cursor = self.heads[bucket];
        while let Some(id) = cursor {
            let entry = arena.get(id);
            let next = entry.next;
            if entry.key() == key {
                match prev {
                    None => self.heads[bucket] = next,
                    Some(prev_id) => arena.get_mut(prev_id).next = next,
                }
                return Some(arena.remove(id));
            }
            prev = cursor;
            cursor = next;
        }
        None
    }

    /// Empty every bucket without touching the arena.
    ///
    /// The table pairs this with [`EntryArena::clear`] so no entry outlives
    /// its chain.
    pub(crate) fn clear(&mut self) {
        self.heads.fill(None);
    }
}

#[cfg(test)]
mod test {
    use super::ChainSet;
    use crate::arena::EntryArena;

    /// Walk one bucket's chain and collect the keys in link order.
    fn chain_keys(chains: &ChainSet, arena: &EntryArena<&str>, bucket: usize) -> Vec<u32> {
        let mut keys = Vec::new();
        let mut cursor = chains.head(bucket);
        while let Some(id) = cursor {
            let entry = arena.get(id);
            keys.push(entry.key());
            cursor = entry.next;
        }
        keys
    }

    #[test]
    fn unlink_head_middle_and_tail() {
        let mut arena = EntryArena::new();
        let mut chains = ChainSet::new(2);
        for (key, value) in [(1, "one"), (2, "two"), (3, "three"), (4, "four")] {
            chains.push_front(&mut arena, 0, key, value);
        }
        // Head insertion: most recent key first.
        assert_eq!(chain_keys(&chains, &arena, 0), vec![4, 3, 2, 1]);

        // Middle
        assert_eq!(chains.unlink(&mut arena, 0, 3).map(|e| e.into_value()), Some("three"));
        assert_eq!(chain_keys(&chains, &arena, 0), vec![4, 2, 1]);

        // Head
        assert_eq!(chains.unlink(&mut arena, 0, 4).map(|e| e.into_value()), Some("four"));
        assert_eq!(chain_keys(&chains, &arena, 0), vec![2, 1]);

        // Tail
        assert_eq!(chains.unlink(&mut arena, 0, 1).map(|e| e.into_value()), Some("one"));
        assert_eq!(chain_keys(&chains, &arena, 0), vec![2]);

        // Absent key leaves the chain untouched.
        assert!(chains.unlink(&mut arena, 0, 9).is_none());
        assert_eq!(chain_keys(&chains, &arena, 0), vec![2]);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn buckets_are_independent() {
        let mut arena = EntryArena::new();
        let mut chains = ChainSet::new(3);
        chains.push_front(&mut arena, 0, 10, "a");
        chains.push_front(&mut arena, 2, 11, "b");

        assert!(chains.find(&arena, 0, 10).is_some());
        assert!(chains.find(&arena, 0, 11).is_none());
        assert!(chains.find(&arena, 2, 11).is_some());
        assert!(chains.head(1).is_none());

        chains.clear();
        assert!(chains.head(0).is_none());
        assert!(chains.head(2).is_none());
    }
}
