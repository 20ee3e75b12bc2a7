use super::AvlMap;
use crate::raw::RawAvlMap;

impl<K, V> AvlMap<K, V> {
    /// Creates an empty map whose node storage holds at least `capacity` entries before
    /// it reallocates.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::AvlMap;
    ///
    /// let map: AvlMap<i32, i32> = AvlMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AvlMap {
            raw: RawAvlMap::with_capacity(capacity),
        }
    }

    /// Returns the number of entries the map can hold without reallocating.
    ///
    /// Slots freed by removals are reused before the storage grows.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::AvlMap;
    ///
    /// let mut map: AvlMap<i32, i32> = AvlMap::with_capacity(32);
    /// map.insert(1, 1);
    /// assert!(map.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
