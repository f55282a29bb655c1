//! Error types for the `bucketx` crate

/// Errors that can occur while constructing a chained table
#[derive(Clone, Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested bucket count was zero.
    ///
    /// A chained table with no buckets has nowhere to store an entry, so
    /// construction reports the misconfiguration instead of returning an
    /// unusable table. Every valid table has at least one bucket.
    #[error("a chained table requires at least one bucket")]
    ZeroBuckets,
}
