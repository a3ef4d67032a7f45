//! Utility functions and traits for `Table`

use crate::{Table, TableError};

/// Extension trait for tables that provides collection-style accessors
pub trait TableExtensions<V> {
    /// Returns the keys of the table as a Vec, in slot order
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the table as a Vec, in slot order
    fn values(&self) -> Vec<V>;

    /// Returns true if the table contains the given key
    fn contains_key(&self, key: &str) -> bool;

    /// Sum of the collisions seen when looking up every stored key
    fn total_collisions(&self) -> usize;
}

impl<V> TableExtensions<V> for Table<V>
where
    V: Clone,
{
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_string()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.has_key(key)
    }

    fn total_collisions(&self) -> usize {
        self.iter().map(|(k, _)| self.get(k).collisions()).sum()
    }
}

/// Creates a `Table` of the given initial capacity from an iterator of key-value pairs
///
/// # Errors
///
/// Propagates the first error returned by [`Table::put`].
pub fn from_pairs<K, V, I>(capacity: usize, iter: I) -> Result<Table<V>, TableError>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut table = Table::new(capacity);

    for (key, value) in iter {
        table.put(key, value)?;
    }

    Ok(table)
}
