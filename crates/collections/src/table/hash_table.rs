use std::{
    borrow::Borrow,
    fmt,
    hash::{BuildHasher, BuildHasherDefault, DefaultHasher, Hash},
    slice,
};

use log::{debug, trace};

use super::{TableError, TableFull, slot::Slot};

/// Fixed-capacity hash table using open addressing with linear probing.
///
/// The slot array is allocated once by [`Table::new`] and never grows.
/// Deleting a key leaves a tombstone behind, which later insertions reuse.
#[derive(Clone)]
pub struct Table<K, V, S = BuildHasherDefault<DefaultHasher>> {
    slots: Box<[Slot<K, V>]>,
    occupied: usize,
    hasher: S,
}

/// Where an insertion lands after probing
enum Target {
    /// slot already holds an equal key
    Update(usize),
    /// empty slot, or the first tombstone seen on the way
    Vacant(usize),
}

#[derive(Debug)]
pub struct Iter<'a, K, V> {
    slots: slice::Iter<'a, Slot<K, V>>,
    left: usize,
}

impl<K: Hash + Eq, V> Table<K, V> {
    /// Creates a new `Table` with `capacity` many empty slots
    pub fn new(capacity: usize) -> Result<Self, TableError> {
        Self::with_hasher(capacity, BuildHasherDefault::default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Table<K, V, S> {
    /// Creates a new `Table` with `capacity` many empty slots,
    /// hashing keys with `hasher`
    pub fn with_hasher(capacity: usize, hasher: S) -> Result<Self, TableError> {
        if capacity == 0 {
            return Err(TableError::InvalidCapacity { capacity });
        }
        debug!(target: "table", "allocating {capacity} slots");

        Ok(Self {
            slots: (0..capacity).map(|_| Slot::Empty).collect(),
            occupied: 0,
            hasher,
        })
    }

    /// Returns the number of slots, fixed at construction
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied slots
    pub fn len(&self) -> usize {
        self.occupied
    }

    /// Shorthand for `self.len() == 0`
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Returns the number of slots left behind by deletes
    pub fn tombstones(&self) -> usize {
        self.slots.iter().filter(|s| s.is_tombstone()).count()
    }

    /// Returns the load factor of the table
    /// computed as occupied slots / capacity, always within `0.0..=1.0`
    pub fn load_factor(&self) -> f64 {
        self.occupied as f64 / self.capacity() as f64
    }

    /// Stores the pair, replacing the value if the key is already present.
    ///
    /// Returns `false` and leaves the table untouched when the key is new
    /// and no empty or tombstoned slot is left.
    pub fn set(&mut self, key: K, value: V) -> bool {
        self.insert(key, value).is_ok()
    }

    /// Insert a key-value pair into the table,
    /// returning the previous value (if there was any)
    ///
    /// # Errors
    ///
    /// Returns [`TableFull`] holding the rejected pair when the key is new
    /// and a full probe cycle found neither an empty slot nor a tombstone.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, TableFull<K, V>> {
        match self.target(&key) {
            Some(Target::Update(i)) => Ok(self.slots[i]
                .value_mut()
                .map(|v| std::mem::replace(v, value))),
            Some(Target::Vacant(i)) => {
                self.slots[i] = Slot::Occupied(key, value);
                self.occupied += 1;
                Ok(None)
            }
            None => {
                debug!(target: "set", "no free slot left among {}", self.capacity());
                Err(TableFull {
                    key,
                    value,
                    capacity: self.capacity(),
                })
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let i = self.find(key)?;
        self.slots[i].value()
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let i = self.find(key)?;
        self.slots[i].value_mut()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Removes the key, returning its value (if there was any).
    /// The freed slot becomes a tombstone.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let i = self.find(key)?;
        let (_, value) = self.slots[i].bury()?;
        self.occupied -= 1;
        trace!(target: "delete", "slot {i} is now a tombstone");

        Some(value)
    }

    // [adapters]

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            left: self.occupied,
        }
    }

    // [private]

    fn start<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        // widening usize -> u64 is lossless, and the remainder fits back into usize
        (self.hasher.hash_one(key) % self.capacity() as u64) as usize
    }

    /// Index of the occupied slot holding `key`.
    /// Tombstones are stepped over, an empty slot ends the search.
    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let start = self.start(key);
        for (step, i) in probe(start, self.capacity()).enumerate() {
            match &self.slots[i] {
                Slot::Empty => {
                    trace!(target: "find", "miss at empty slot {i}, started at {start}, {step} steps");
                    return None;
                }
                Slot::Occupied(k, _) if Borrow::<Q>::borrow(k) == key => {
                    trace!(target: "find", "hit at slot {i}, started at {start}, {step} steps");
                    return Some(i);
                }
                _ => {}
            }
        }

        trace!(target: "find", "miss after a full cycle of {} steps from {start}", self.capacity());
        None
    }

    /// Where `key` should be written.
    ///
    /// An equal key always wins over an earlier tombstone, otherwise the key
    /// would end up in two slots at once.
    fn target(&self, key: &K) -> Option<Target> {
        let start = self.start(key);
        let mut reuse = None;

        for (step, i) in probe(start, self.capacity()).enumerate() {
            match &self.slots[i] {
                Slot::Empty => {
                    let i = reuse.unwrap_or(i);
                    trace!(target: "set", "new key goes to slot {i}, started at {start}, {step} steps");
                    return Some(Target::Vacant(i));
                }
                Slot::Occupied(k, _) if k == key => {
                    trace!(target: "set", "updating slot {i}, started at {start}, {step} steps");
                    return Some(Target::Update(i));
                }
                Slot::Tombstone if reuse.is_none() => reuse = Some(i),
                _ => {}
            }
        }

        trace!(
            target: "set",
            "full cycle of {} steps from {start}, reusing {reuse:?}",
            self.capacity()
        );
        reuse.map(Target::Vacant)
    }
}

/// Linear probe sequence visiting every slot once, starting at `start`.
/// Coming back around to `start` ends the cycle.
fn probe(start: usize, cap: usize) -> impl Iterator<Item = usize> {
    (0..cap).map(move |step| (start + step) % cap)
}

impl<K, V, S> fmt::Debug for Table<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().filter_map(|s| match s {
                Slot::Occupied(k, v) => Some((k, v)),
                _ => None,
            }))
            .finish()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.left == 0 {
            return None;
        }

        loop {
            match self.slots.next()? {
                Slot::Occupied(k, v) => {
                    self.left -= 1;
                    return Some((k, v));
                }
                _ => continue,
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.left, Some(self.left))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a Table<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
