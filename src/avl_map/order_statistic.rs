use core::borrow::Borrow;
use core::ops::{Index, IndexMut};

use super::AvlMap;
use crate::{Rank, TableError};

impl<K, V> AvlMap<K, V> {
    /// Returns the key at position `rank` in sorted order.
    ///
    /// The rank is zero-based, so `select(0)` is the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::RankOutOfRange`] if `rank >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::{AvlMap, TableError};
    ///
    /// let map = AvlMap::from([(10, "a"), (30, "c"), (20, "b")]);
    /// assert_eq!(map.select(1), Ok(&20));
    /// assert_eq!(map.select(3), Err(TableError::RankOutOfRange { rank: 3, len: 3 }));
    /// ```
    pub fn select(&self, rank: usize) -> Result<&K, TableError> {
        self.select_entry(rank).map(|(key, _)| key)
    }

    /// Returns the entry at position `rank` in sorted order.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::RankOutOfRange`] if `rank >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn select_entry(&self, rank: usize) -> Result<(&K, &V), TableError> {
        self.raw.select(rank).ok_or(TableError::RankOutOfRange { rank, len: self.len() })
    }

    /// Returns the key and a mutable reference to the value at position `rank`.
    ///
    /// The key is returned as a shared reference because mutating it would
    /// violate the map's ordering invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::RankOutOfRange`] if `rank >= self.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::AvlMap;
    ///
    /// let mut map = AvlMap::from([(10, "a"), (5, "b")]);
    /// if let Ok((key, value)) = map.select_entry_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    pub fn select_entry_mut(&mut self, rank: usize) -> Result<(&K, &mut V), TableError> {
        let len = self.len();
        self.raw.select_mut(rank).ok_or(TableError::RankOutOfRange { rank, len })
    }
}

impl<K: Ord, V> AvlMap<K, V> {
    /// Returns the number of keys strictly less than `key`.
    ///
    /// `key` does not have to be present; for a present key this is its zero-based
    /// position, so `select(rank(key)) == Ok(key)`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::AvlMap;
    ///
    /// let map = AvlMap::from([(10, "a"), (20, "b"), (30, "c")]);
    /// assert_eq!(map.rank(&20), 1);
    /// assert_eq!(map.rank(&25), 2);
    /// assert_eq!(map.rank(&0), 0);
    /// ```
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank(key)
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use avl_table::{AvlMap, Rank};
///
/// let map = AvlMap::from([("a", 1), ("b", 2)]);
/// assert_eq!(map[Rank(1)], 2);
/// ```
impl<K, V> Index<Rank> for AvlMap<K, V> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.select_entry(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use avl_table::{AvlMap, Rank};
///
/// let mut map = AvlMap::from([("a", 1), ("b", 2)]);
/// map[Rank(1)] = 5;
/// assert_eq!(map.get(&"b"), Some(&5));
/// ```
impl<K, V> IndexMut<Rank> for AvlMap<K, V> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.select_entry_mut(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}
