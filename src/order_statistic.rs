/// A zero-based position in the key order of an [`AvlMap`](crate::AvlMap).
///
/// Indexing a map with a `Rank` selects by position instead of by key, which keeps the
/// two `Index` impls apart when the key type is itself an integer.
///
/// # Examples
///
/// ```
/// use avl_table::{AvlMap, Rank};
///
/// let mut map = AvlMap::new();
/// map.insert(30, "c");
/// map.insert(10, "a");
/// map.insert(20, "b");
///
/// assert_eq!(map[Rank(0)], "a");
/// assert_eq!(map[&30], "c");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
