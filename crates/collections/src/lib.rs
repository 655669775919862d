//! Fixed-capacity collections.
//!
//! [`Table`] is an open addressing hash table with linear probing. Its slot
//! array is allocated once and never grows: running out of slots is reported
//! to the caller instead of triggering a resize.

mod macros;
pub mod table;

pub use table::{Iter, Table, TableError, TableFull};
