#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![deny(clippy::missing_docs_in_private_items)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]

mod arena;
mod chain;
mod err;
mod hasher;

// Export the entry arena API only to the fuzzer.
// (This is not stable; you should not use it except for testing.)
#[cfg(feature = "entry-arena")]
pub use arena::{Entry, EntryArena, EntryId};

pub use err::Error;
pub use hasher::{KeyHasher, Xxh3KeyHasher};

use crate::chain::ChainSet;
use std::fmt;
use tracing::{debug, trace};

/// One chained hash table, customized by bucket count and hasher
///
/// A `ChainTable` owns a fixed array of buckets, an arena holding every
/// entry, and the hasher bound at construction. Each bucket heads a singly
/// linked chain of entries whose hashed keys landed on it; within a chain
/// all keys are distinct, and new keys are prepended.
///
/// The table deep-owns its values: [`insert`](Self::insert) moves a value
/// in, [`remove`](Self::remove) moves it back out, and
/// [`delete`](Self::delete) removes and drops in one step. Dropping the
/// table drops everything still stored.
pub struct ChainTable<V, H = Xxh3KeyHasher> {
    /// Bucket heads and every chain operation
    chains: ChainSet,
    /// Storage for all live entries
    arena: arena::EntryArena<V>,
    /// Hash function bound for the table's lifetime
    hasher: H,
}

impl<V> ChainTable<V> {
    /// Make a new table with `num_buckets` buckets and the default
    /// [`Xxh3KeyHasher`].
    ///
    /// Fails with [`Error::ZeroBuckets`] when `num_buckets` is zero.
    pub fn new(num_buckets: usize) -> Result<Self, Error> {
        ChainTableBuilder::new().buckets(num_buckets).build()
    }
}

impl<V, H: KeyHasher> ChainTable<V, H> {
    /// Make a new table with `num_buckets` buckets and a caller-supplied
    /// hasher.
    ///
    /// Fails with [`Error::ZeroBuckets`] when `num_buckets` is zero.
    pub fn with_hasher(num_buckets: usize, hasher: H) -> Result<Self, Error> {
        ChainTableBuilder::new()
            .buckets(num_buckets)
            .hasher(hasher)
            .build()
    }

    /// Reduce a key's hash to an in-range bucket index.
    #[inline(always)]
    fn bucket_of(&self, key: u32) -> usize {
        (self.hasher.hash_key(key) % self.chains.num_buckets() as u64) as usize
    }

    /// Map `key` to `value`, replacing any existing mapping.
    ///
    /// Returns the previous value when the key was already present, after
    /// replacing it in place; the entry keeps its chain position. For a new
    /// key, exactly one entry is allocated and linked as its bucket's chain
    /// head, and `None` comes back. Afterwards `get(key)` yields `value`
    /// either way.
    pub fn insert(&mut self, key: u32, value: V) -> Option<V> {
        let bucket = self.bucket_of(key);
        if let Some(id) = self.chains.find(&self.arena, bucket, key) {
            let old = std::mem::replace(self.arena.get_mut(id).value_mut(), value);
            trace!(key, bucket, "replaced value in place");
            return Some(old);
        }
        self.chains.push_front(&mut self.arena, bucket, key, value);
        trace!(key, bucket, "linked new chain head");
        None
    }

    /// Look up the value mapped to `key`.
    ///
    /// Scans the key's bucket chain linearly; cost is the chain length,
    /// which a degenerate hasher can stretch to the full entry count.
    pub fn get(&self, key: u32) -> Option<&V> {
        let bucket = self.bucket_of(key);
        let id = self.chains.find(&self.arena, bucket, key)?;
        Some(self.arena.get(id).value())
    }

    /// Look up the value mapped to `key`, with exclusive access.
    pub fn get_mut(&mut self, key: u32) -> Option<&mut V> {
        let bucket = self.bucket_of(key);
        let id = self.chains.find(&self.arena, bucket, key)?;
        Some(self.arena.get_mut(id).value_mut())
    }

    /// Whether `key` currently has a mapping.
    pub fn contains_key(&self, key: u32) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key`'s mapping and hand its value back to the caller.
    ///
    /// Unlinks the entry from its chain and recycles the entry's slot; the
    /// value itself is moved out intact. Returns `None`, leaving the table
    /// unchanged, when the key has no mapping.
    pub fn remove(&mut self, key: u32) -> Option<V> {
        let bucket = self.bucket_of(key);
        let entry = self.chains.unlink(&mut self.arena, bucket, key)?;
        trace!(key, bucket, "unlinked entry");
        Some(entry.into_value())
    }

    /// Remove `key`'s mapping and drop its value.
    ///
    /// Composition of [`remove`](Self::remove) and a drop. Returns whether
    /// a mapping existed.
    pub fn delete(&mut self, key: u32) -> bool {
        self.remove(key).is_some()
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether the table stores no entries at all.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// The fixed bucket count this table was built with.
    pub fn num_buckets(&self) -> usize {
        self.chains.num_buckets()
    }

    /// Drop every entry, keeping the bucket count.
    pub fn clear(&mut self) {
        let dropped = self.len();
        self.chains.clear();
        self.arena.clear();
        trace!(dropped, "cleared table");
    }

    /// Visit every `(key, &value)` association.
    ///
    /// Runs over buckets in index order and over each chain head-first, so
    /// within one bucket the order is reverse insertion order. No ordering
    /// across buckets is meaningful to callers.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            arena: &self.arena,
            chains: &self.chains,
            bucket: 0,
            cursor: None,
        }
    }
}

impl<V, H> fmt::Debug for ChainTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainTable")
            .field("num_buckets", &self.chains.num_buckets())
            .field("len", &self.arena.len())
            .finish_non_exhaustive()
    }
}

impl<'a, V, H: KeyHasher> IntoIterator for &'a ChainTable<V, H> {
    type Item = (u32, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over every association in a [`ChainTable`]
///
/// Created by [`ChainTable::iter`]. Yields `(key, &value)` pairs in bucket
/// order, head-first within each chain.
pub struct Iter<'a, V> {
    /// Entry storage backing the table being iterated
    arena: &'a arena::EntryArena<V>,
    /// Bucket heads of the table being iterated
    chains: &'a ChainSet,
    /// Next bucket index whose chain has not been entered yet
    bucket: usize,
    /// Current position in the chain being walked, if any
    cursor: Option<arena::EntryId>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (u32, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(id) = self.cursor {
                let entry = self.arena.get(id);
                self.cursor = entry.next;
                return Some((entry.key(), entry.value()));
            }
            if self.bucket >= self.chains.num_buckets() {
                return None;
            }
            self.cursor = self.chains.head(self.bucket);
            self.bucket += 1;
        }
    }
}

/// Builder for creating [`ChainTable`] instances with custom settings
///
/// ```
/// use bucketx::{ChainTableBuilder, Xxh3KeyHasher};
///
/// let table = ChainTableBuilder::new()
///     .buckets(128)
///     .hasher(Xxh3KeyHasher)
///     .build::<u64>()
///     .unwrap();
/// assert!(table.is_empty());
/// ```
pub struct ChainTableBuilder<H = Xxh3KeyHasher> {
    /// Bucket count for the table under construction
    num_buckets: usize,
    /// Hasher for the table under construction
    hasher: H,
}

impl ChainTableBuilder {
    /// Bucket count used when [`Self::buckets`] is never called
    pub const DEFAULT_BUCKETS: usize = 16;

    /// Create a new [`ChainTableBuilder`] with default settings.
    ///
    /// Immediately calling [`Self::build()`] yields a table with
    /// [`Self::DEFAULT_BUCKETS`] buckets and the default [`Xxh3KeyHasher`].
    pub fn new() -> Self {
        Self {
            num_buckets: Self::DEFAULT_BUCKETS,
            hasher: Xxh3KeyHasher,
        }
    }
}

impl<H: KeyHasher> ChainTableBuilder<H> {
    /// Select the bucket count, fixed for the built table's lifetime.
    pub fn buckets(mut self, num_buckets: usize) -> Self {
        self.num_buckets = num_buckets;
        self
    }

    /// Select the hash function bound to the built table.
    ///
    /// Accepts any [`KeyHasher`], including a bare `Fn(u32) -> u64`
    /// closure.
    pub fn hasher<H2: KeyHasher>(self, hasher: H2) -> ChainTableBuilder<H2> {
        ChainTableBuilder {
            num_buckets: self.num_buckets,
            hasher,
        }
    }

    /// Build a [`ChainTable`] with the selected settings.
    ///
    /// Fails with [`Error::ZeroBuckets`] when the selected bucket count is
    /// zero; no table is produced in that case.
    pub fn build<V>(self) -> Result<ChainTable<V, H>, Error> {
        if self.num_buckets == 0 {
            return Err(Error::ZeroBuckets);
        }
        debug!(num_buckets = self.num_buckets, "building chained table");
        Ok(ChainTable {
            chains: ChainSet::new(self.num_buckets),
            arena: arena::EntryArena::new(),
            hasher: self.hasher,
        })
    }
}

impl Default for ChainTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for ChainTableBuilder<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainTableBuilder")
            .field("num_buckets", &self.num_buckets)
            .finish_non_exhaustive()
    }
}
