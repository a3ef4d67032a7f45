//! Errors raised by table configuration and prime selection

use thiserror::Error;

/// Configuration errors reported by [`Table`](crate::Table) and [`PrimeSieve`](crate::PrimeSieve).
///
/// A missing key is not an error; lookups report it through [`Lookup`](crate::Lookup).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("prime sieve covers 0..={bound}, cannot answer a query for {index}")]
    SieveOutOfBounds { index: usize, bound: usize },
    #[error("no prime sieve has been built for this table")]
    SieveMissing,
    #[error("no prime exists at or below {0}")]
    NoPrimeAtOrBelow(usize),
    #[error("no prime exists between {from} and the sieve bound {bound}")]
    NoPrimeAtOrAbove { from: usize, bound: usize },
    #[error("probe sequence for key {key:?} visited all {capacity} slots without a free one")]
    ProbeExhausted { key: String, capacity: usize },
    #[error("capacity {capacity} cannot hold the {count} stored entries")]
    CapacityTooSmall { capacity: usize, count: usize },
    #[error("max load must lie strictly between 0 and 1, got {0}")]
    InvalidMaxLoad(f64),
}
