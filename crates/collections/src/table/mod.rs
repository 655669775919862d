use std::fmt;

use thiserror::Error;

mod hash_table;
mod slot;

pub use hash_table::{Iter, Table};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    #[error("Invalid table capacity, got: {capacity}, expected a positive number of slots")]
    InvalidCapacity { capacity: usize },
}

/// Returned by [`Table::insert`] when the key is not present and every slot
/// is occupied. The rejected pair is handed back untouched.
#[derive(Error)]
#[error("Table is full, no free slot among {capacity} for a new key")]
pub struct TableFull<K, V> {
    pub key: K,
    pub value: V,
    pub capacity: usize,
}

impl<K, V> TableFull<K, V> {
    /// Consumes the error, returning the pair that could not be stored
    pub fn into_inner(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> fmt::Debug for TableFull<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableFull")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
