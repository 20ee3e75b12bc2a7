use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Bound, Index, RangeBounds};

use crate::TableError;
use crate::raw::RawAvlMap;

mod capacity;
mod invariants;
mod iter;
mod order_statistic;

pub use crate::Rank;
pub use iter::{Iter, Keys, LevelOrder, LevelOrderKeys, Range, Values};

/// Validates that the start bound does not exceed the end bound.
///
/// # Panics
///
/// Panics if `start > end` or if `start == end` and both bounds are `Excluded`.
fn validate_range_bounds<T, R>(range: &R)
where
    T: ?Sized + Ord,
    R: RangeBounds<T>,
{
    if let (Bound::Included(start) | Bound::Excluded(start), Bound::Included(end) | Bound::Excluded(end)) =
        (range.start_bound(), range.end_bound())
    {
        let valid =
            if matches!(range.start_bound(), Bound::Excluded(_)) && matches!(range.end_bound(), Bound::Excluded(_)) {
                start < end
            } else {
                start <= end
            };
        assert!(valid, "range start is greater than range end in AvlMap");
    }
}

/// An ordered symbol table based on an [AVL tree].
///
/// Given a key type with a [total order], the map stores at most one value per key and
/// keeps its entries in key order. Every node caches its height and the number of
/// entries below it, which keeps the tree within ~1.44 log<sub>2</sub>n levels and lets
/// positional queries ([`select`](AvlMap::select), [`rank`](AvlMap::rank),
/// [`size_in_range`](AvlMap::size_in_range)) run in O(log n) alongside the usual
/// lookups and updates.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the map. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `AvlMap` that observed the logic error and not result in undefined behavior. [`check`]
/// will usually report it as a [`BstOrder`] violation.
///
/// # Examples
///
/// ```
/// use avl_table::{AvlMap, TableError};
///
/// let mut table = AvlMap::new();
/// for key in 1..=7 {
///     table.insert(key, key * key);
/// }
///
/// // Ascending inserts would degrade a plain BST into a list.
/// assert_eq!(table.height(), 2);
///
/// assert_eq!(table.get(&3), Some(&9));
/// assert_eq!(table.min(), Ok(&1));
/// assert_eq!(table.delete_max(), Ok((7, 49)));
/// assert_eq!(table.size_in_range(&2, &5), 4);
///
/// table.clear();
/// assert_eq!(table.delete_min(), Err(TableError::Empty));
/// ```
///
/// A map with a known list of entries can be initialized from an array:
///
/// ```
/// use avl_table::AvlMap;
///
/// let planets = AvlMap::from([
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
///     ("Earth", 1.0),
///     ("Mars", 1.5),
/// ]);
/// assert_eq!(planets.keys_level_order().next(), Some(&"Mercury"));
/// ```
///
/// [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree
/// [total order]: https://en.wikipedia.org/wiki/Total_order
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
/// [`check`]: AvlMap::check
/// [`BstOrder`]: crate::Invariant::BstOrder
#[derive(Clone)]
pub struct AvlMap<K, V> {
    raw: RawAvlMap<K, V>,
}

impl<K, V> AvlMap<K, V> {
    /// Makes a new, empty `AvlMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        AvlMap { raw: RawAvlMap::new() }
    }

    /// Returns the number of entries in the map.
    ///
    /// The count is read from the root's cached subtree size.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::AvlMap;
    ///
    /// let mut a = AvlMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the height of the tree: `-1` when empty, `0` for a single entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.height(), -1);
    /// map.insert('a', ());
    /// assert_eq!(map.height(), 0);
    /// ```
    #[must_use]
    pub fn height(&self) -> isize {
        self.raw.height()
    }

    /// Clears the map, removing all entries.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Empty`] if the map has no entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::{AvlMap, TableError};
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.min(), Err(TableError::Empty));
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&K, TableError> {
        self.first_key_value().map(|(key, _)| key).ok_or(TableError::Empty)
    }

    /// Returns the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Empty`] if the map has no entries.
    pub fn max(&self) -> Result<&K, TableError> {
        self.last_key_value().map(|(key, _)| key).ok_or(TableError::Empty)
    }

    /// Returns the entry with the smallest key, or `None` if the map is empty.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first_key_value()
    }

    /// Returns the entry with the largest key, or `None` if the map is empty.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last_key_value()
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Empty`] if the map has no entries; the map is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::{AvlMap, TableError};
    ///
    /// let mut map = AvlMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.delete_min(), Ok((1, "a")));
    /// assert_eq!(map.delete_min(), Ok((2, "b")));
    /// assert_eq!(map.delete_min(), Err(TableError::Empty));
    /// ```
    pub fn delete_min(&mut self) -> Result<(K, V), TableError> {
        self.raw.pop_first().ok_or(TableError::Empty)
    }

    /// Removes and returns the entry with the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Empty`] if the map has no entries; the map is unchanged.
    pub fn delete_max(&mut self) -> Result<(K, V), TableError> {
        self.raw.pop_last().ok_or(TableError::Empty)
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::AvlMap;
    ///
    /// let map = AvlMap::from([(3, "c"), (2, "b"), (1, "a")]);
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::starting_at(&self.raw, 0, self.len())
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Gets a breadth-first iterator over the entries: the root, then its children left
    /// to right, then their children, and so on.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::AvlMap;
    ///
    /// let map: AvlMap<_, _> = (1..=7).map(|k| (k, ())).collect();
    /// let levels: Vec<_> = map.level_order().map(|(k, _)| *k).collect();
    /// assert_eq!(levels, [4, 2, 6, 1, 3, 5, 7]);
    /// ```
    pub fn level_order(&self) -> LevelOrder<'_, K, V> {
        LevelOrder::new(&self.raw)
    }

    /// Gets a breadth-first iterator over the keys. See [`level_order`](AvlMap::level_order).
    pub fn keys_level_order(&self) -> LevelOrderKeys<'_, K, V> {
        LevelOrderKeys::new(self.level_order())
    }
}

impl<K: Ord, V> AvlMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).is_some()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned.
    ///
    /// If the map did have this key present, the value is updated in place and the old
    /// value is returned. The key is not updated.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if a new key would take the map past its addressable node count
    /// (`u32::MAX` entries); the map is left unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Stores `value` under `key`, or removes `key` when `value` is `None`.
    ///
    /// Returns the value previously stored under `key`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.put("k", Some(1)), None);
    /// assert_eq!(map.put("k", Some(2)), Some(1));
    /// assert_eq!(map.put("k", None), Some(2));
    /// assert!(!map.contains_key("k"));
    /// ```
    pub fn put(&mut self, key: K, value: Option<V>) -> Option<V> {
        match value {
            Some(value) => self.insert(key, value),
            None => self.remove(&key),
        }
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map. Removing an absent key changes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if the key
    /// was previously in the map.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key)
    }

    /// Returns the largest key less than or equal to `key`, or `None` if every key is
    /// larger.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::AvlMap;
    ///
    /// let map = AvlMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.floor(&25), Some(&20));
    /// assert_eq!(map.floor(&30), Some(&30));
    /// assert_eq!(map.floor(&5), None);
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.floor(key)
    }

    /// Returns the smallest key greater than or equal to `key`, or `None` if every key
    /// is smaller.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::AvlMap;
    ///
    /// let map = AvlMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.ceiling(&25), Some(&30));
    /// assert_eq!(map.ceiling(&35), None);
    /// ```
    pub fn ceiling<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.ceiling(key)
    }

    /// Constructs an iterator over a sub-range of entries in the map, in key order.
    ///
    /// The simplest way is to use the range syntax `min..max`, thus `range(min..max)` will
    /// yield entries from min (inclusive) to max (exclusive). The range may also be
    /// entered as `(Bound<T>, Bound<T>)`.
    ///
    /// Subtrees entirely outside the range are never visited.
    ///
    /// # Panics
    ///
    /// Panics if range `start > end`.
    /// Panics if range `start == end` and both bounds are `Excluded`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::AvlMap;
    /// use std::ops::Bound::Included;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(3, "a");
    /// map.insert(5, "b");
    /// map.insert(8, "c");
    /// for (&key, &value) in map.range((Included(&4), Included(&8))) {
    ///     println!("{key}: {value}");
    /// }
    /// assert_eq!(Some((&5, &"b")), map.range(4..).next());
    /// assert_eq!(map.range(4..).len(), 2);
    /// ```
    pub fn range<T, R>(&self, range: R) -> Range<'_, K, V>
    where
        T: ?Sized + Ord,
        K: Borrow<T>,
        R: RangeBounds<T>,
    {
        validate_range_bounds(&range);
        let start = match range.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(lo) => self.raw.rank(lo),
            Bound::Excluded(lo) => self.raw.rank(lo) + usize::from(self.contains_key(lo)),
        };
        let end = match range.end_bound() {
            Bound::Unbounded => self.len(),
            Bound::Included(hi) => self.raw.rank(hi) + usize::from(self.contains_key(hi)),
            Bound::Excluded(hi) => self.raw.rank(hi),
        };
        Range::new(Iter::starting_at(&self.raw, start, end.saturating_sub(start)))
    }

    /// Gets the keys in `[lo, hi]`, in sorted order. Yields nothing if `lo > hi`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::AvlMap;
    ///
    /// let map: AvlMap<char, ()> = ('A'..='Z').map(|c| (c, ())).collect();
    /// assert_eq!(map.keys_in_range(&'W', &'Z').collect::<String>(), "WXYZ");
    /// assert_eq!(map.keys_in_range(&'Z', &'W').count(), 0);
    /// ```
    pub fn keys_in_range<Q>(&self, lo: &Q, hi: &Q) -> Keys<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if lo > hi {
            return Keys::new(Iter::starting_at(&self.raw, 0, 0));
        }
        Keys::new(self.range((Bound::Included(lo), Bound::Included(hi))).into_inner())
    }

    /// Returns the number of keys in `[lo, hi]`, or zero if `lo > hi`.
    ///
    /// Computed from two ranks and one lookup, without visiting the keys in between.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::AvlMap;
    ///
    /// let map = AvlMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.size_in_range(&10, &30), 3);
    /// assert_eq!(map.size_in_range(&11, &29), 1);
    /// assert_eq!(map.size_in_range(&30, &10), 0);
    /// ```
    pub fn size_in_range<Q>(&self, lo: &Q, hi: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if lo > hi {
            return 0;
        }
        self.raw.rank(hi) - self.raw.rank(lo) + usize::from(self.contains_key(hi))
    }
}

impl<K: Hash, V: Hash> Hash for AvlMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for entry in self {
            entry.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for AvlMap<K, V> {
    fn eq(&self, other: &AvlMap<K, V>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for AvlMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AvlMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for AvlMap<K, V> {
    /// Creates an empty `AvlMap`.
    fn default() -> AvlMap<K, V> {
        AvlMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> AvlMap<K, V> {
        let mut map = AvlMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlMap<K, V> {
    #[inline]
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for AvlMap<K, V> {
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<'a, K, V> IntoIterator for &'a AvlMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// Looks up a value by key.
///
/// # Panics
///
/// Panics if the key is not present in the `AvlMap`.
impl<K, Q, V> Index<&Q> for AvlMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for AvlMap<K, V> {
    /// Converts a `[(K, V); N]` into an `AvlMap<(K, V)>`.
    ///
    /// If any entries in the array have equal keys, all but one of the corresponding
    /// values will be dropped.
    fn from(arr: [(K, V); N]) -> Self {
        AvlMap::from_iter(arr)
    }
}
