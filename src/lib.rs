//! # Prime Table
//!
//! An open-addressing hash table from string keys to arbitrary values, built on a flat slot
//! array with prime-sized storage.
//!
//! The crate exposes the moving parts a general-purpose map hides:
//!
//! - [`HashStrategy`]: how a key picks its home slot
//! - [`ProbeKind`] and [`ProbeSequence`]: which slots are visited after a collision
//! - [`PrimeSieve`]: a Sieve of Eratosthenes used to pick prime capacities
//! - [`Table`]: the container itself, which grows to the smallest prime at least twice its size
//!   whenever the load factor passes its threshold
//!
//! Entries cannot be removed, and the table is not thread-safe.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primetable::Table;
//!
//! let mut table = Table::new(20);
//!
//! // Insert values
//! table.put("apple", 1)?;
//! table.put("banana", 2)?;
//!
//! // Retrieve values, along with how many collisions the lookup walked past
//! let lookup = table.get("apple");
//! assert_eq!(lookup.value(), Some(&1));
//!
//! // Update values
//! assert_eq!(table.put("apple", 10)?, Some(1));
//! assert_eq!(table.get("apple").value(), Some(&10));
//!
//! // Absent keys are reported, not errors
//! assert!(!table.get("cherry").is_found());
//! # Ok::<(), primetable::TableError>(())
//! ```
//!
//! ## Prime Capacities and Double Hashing
//!
//! ```rust
//! use primetable::{ProbeKind, Table};
//!
//! let mut table: Table<u32> = Table::new(10_000);
//! table.make_sieve(10_000);
//! table.set_probe(ProbeKind::DoubleHash)?;
//!
//! // rounds down to the largest prime not above the bound
//! assert_eq!(table.set_capacity(10_000)?, 9973);
//! # Ok::<(), primetable::TableError>(())
//! ```

/// Errors raised by configuration and prime selection
mod error;
/// Home-slot hash functions
mod hash;
/// Probe strategies and the bounded probe walk
mod probe;
/// Prime sieve and trial-division helpers
pub mod sieve;
/// The open-addressing table
mod table;
/// Utility functions and traits for the table
mod utils;

pub use error::TableError;
pub use hash::{HashStrategy, LARGE_CONSTANT};
pub use probe::{ProbeKind, ProbeSequence, secondary_hash};
pub use sieve::PrimeSieve;
pub use table::{Iter, Lookup, Table};
pub use utils::{TableExtensions, from_pairs};
