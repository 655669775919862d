//! A [`Table`] shared between threads.
//!
//! The table itself does no synchronization. [`SharedTable`] puts it behind a
//! single [`Mutex`] and takes the lock once per operation.

use std::{
    borrow::Borrow,
    hash::{BuildHasher, BuildHasherDefault, DefaultHasher, Hash},
    sync::{Mutex, MutexGuard},
};

use log::warn;

use crate::{StorageError, Table};

#[derive(Debug)]
pub struct SharedTable<K, V, S = BuildHasherDefault<DefaultHasher>> {
    inner: Mutex<Table<K, V, S>>,
}

impl<K: Hash + Eq, V> SharedTable<K, V> {
    pub fn new(capacity: usize) -> Result<Self, StorageError> {
        Ok(Self::from(Table::new(capacity)?))
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> SharedTable<K, V, S> {
    pub fn with_hasher(capacity: usize, hasher: S) -> Result<Self, StorageError> {
        Ok(Self::from(Table::with_hasher(capacity, hasher)?))
    }

    /// See [`Table::set`]
    pub fn set(&self, key: K, value: V) -> Result<bool, StorageError> {
        Ok(self.lock()?.set(key, value))
    }

    /// Looks up `key`, cloning the value out so the lock is not held
    pub fn get<Q>(&self, key: &Q) -> Result<Option<V>, StorageError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        Ok(self.lock()?.get(key).cloned())
    }

    /// See [`Table::delete`]
    pub fn delete<Q>(&self, key: &Q) -> Result<Option<V>, StorageError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        Ok(self.lock()?.delete(key))
    }

    pub fn load_factor(&self) -> Result<f64, StorageError> {
        Ok(self.lock()?.load_factor())
    }

    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.lock()?.len())
    }

    /// Runs `f` with exclusive access to the table,
    /// for sequences of operations that must not interleave
    pub fn with<R>(&self, f: impl FnOnce(&mut Table<K, V, S>) -> R) -> Result<R, StorageError> {
        Ok(f(&mut *self.lock()?))
    }

    /// Consumes the wrapper, returning the table
    pub fn into_inner(self) -> Result<Table<K, V, S>, StorageError> {
        self.inner.into_inner().map_err(|_| StorageError::Poisoned)
    }

    // [private]

    fn lock(&self) -> Result<MutexGuard<'_, Table<K, V, S>>, StorageError> {
        self.inner.lock().map_err(|_| {
            warn!(target: "storage", "table lock poisoned");
            StorageError::Poisoned
        })
    }
}

impl<K, V, S> From<Table<K, V, S>> for SharedTable<K, V, S> {
    fn from(table: Table<K, V, S>) -> Self {
        Self {
            inner: Mutex::new(table),
        }
    }
}
