/// State of one position in the slot array.
///
/// `Tombstone` is left behind by a delete so that probes for keys stored
/// further along the chain keep going. It never turns back into `Empty`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum Slot<K, V> {
    #[default]
    Empty,
    Occupied(K, V),
    Tombstone,
}

impl<K, V> Slot<K, V> {
    pub(crate) fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    pub(crate) fn value(&self) -> Option<&V> {
        match self {
            Slot::Occupied(_, v) => Some(v),
            _ => None,
        }
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        match self {
            Slot::Occupied(_, v) => Some(v),
            _ => None,
        }
    }

    /// Turns an occupied slot into a tombstone, returning what it held
    pub(crate) fn bury(&mut self) -> Option<(K, V)> {
        match std::mem::replace(self, Slot::Tombstone) {
            Slot::Occupied(k, v) => Some((k, v)),
            // not ours to bury, put it back
            other => {
                *self = other;
                None
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::Slot;

    #[test]
    fn value() {
        let mut s = Slot::Occupied("foo", 1);
        *s.value_mut().unwrap() += 1;
        assert_eq!(s.value(), Some(&2));

        s.bury();
        assert_eq!(s.value(), None);
        assert_eq!(s.value_mut(), None);
    }

    #[test]
    fn bury() {
        let mut s = Slot::Occupied("foo", "bar");
        assert_eq!(s.bury(), Some(("foo", "bar")));
        assert!(s.is_tombstone());

        assert_eq!(s.bury(), None);
        assert!(s.is_tombstone());

        let mut e: Slot<&str, &str> = Slot::default();
        assert_eq!(e.value_mut(), None);
        assert_eq!(e.bury(), None);
        assert_eq!(e, Slot::Empty);
    }
}
