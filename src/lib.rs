pub mod storage;

use thiserror::Error;

pub use collections::{Iter, Table, TableError, TableFull, table};
pub use storage::SharedTable;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Derived construction error
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Another thread panicked while holding the table lock,
    /// the table may be half way through an update
    #[error("Table lock poisoned by a panicking thread")]
    Poisoned,
}
