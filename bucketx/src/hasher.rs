//! The hash function seam
//!
//! The table does not hash keys itself. A [`KeyHasher`] is supplied by the
//! caller and bound at construction, and the table reduces whatever 64-bit
//! value it produces to a bucket index by modulo. That keeps the bucket
//! index structurally in range no matter what the hasher returns, so a
//! misbehaving hasher can degrade distribution but never memory safety.
//!
//! The one contract a hasher must uphold: the same key must hash to the
//! same value for the table's whole lifetime. Entries are filed under the
//! bucket computed at insertion and are never rehashed, so a hasher that
//! drifts between calls makes its own entries unreachable.

use xxhash_rust::xxh3::xxh3_64;

/// A pure mapping from table keys to 64-bit hash values
///
/// Implemented for any `Fn(u32) -> u64` closure, so ad-hoc hashers can be
/// plugged in without a named type:
///
/// ```
/// use bucketx::ChainTableBuilder;
///
/// let table = ChainTableBuilder::new()
///     .buckets(3)
///     .hasher(|key: u32| u64::from(key))
///     .build::<&str>()
///     .unwrap();
/// assert_eq!(table.num_buckets(), 3);
/// ```
pub trait KeyHasher {
    /// Hash one key.
    ///
    /// Must return the same value every time it is called with the same
    /// key on the same table.
    fn hash_key(&self, key: u32) -> u64;
}

impl<F: Fn(u32) -> u64> KeyHasher for F {
    #[inline(always)]
    fn hash_key(&self, key: u32) -> u64 {
        self(key)
    }
}

/// The default [`KeyHasher`], XXH3 over the key's little-endian bytes
///
/// XXH3 spreads consecutive integer keys well across any bucket count,
/// which keeps chains short for the common dense-key workloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xxh3KeyHasher;

impl KeyHasher for Xxh3KeyHasher {
    #[inline(always)]
    fn hash_key(&self, key: u32) -> u64 {
        xxh3_64(&key.to_le_bytes())
    }
}
