use alloc::collections::VecDeque;
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::raw::{Handle, MAX_DEPTH, RawAvlMap};

/// An iterator over the entries of an `AvlMap`, in key order.
///
/// This `struct` is created by the [`iter`] method on [`AvlMap`]. See its
/// documentation for more.
///
/// [`iter`]: super::AvlMap::iter
/// [`AvlMap`]: super::AvlMap
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    raw: &'a RawAvlMap<K, V>,
    // Nodes still to be yielded whose left subtrees are done; the next one is on top.
    stack: SmallVec<[Handle; MAX_DEPTH]>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Positions the iterator on the entry of rank `start` and lets it yield `len`
    /// entries from there.
    pub(super) fn starting_at(raw: &'a RawAvlMap<K, V>, start: usize, len: usize) -> Self {
        let mut stack = SmallVec::new();
        let mut remaining = start;
        let mut cursor = raw.root();
        while let Some(handle) = cursor {
            let node = raw.node(handle);
            let left = raw.subtree_len(node.left());
            match remaining.cmp(&left) {
                Ordering::Less => {
                    stack.push(handle);
                    cursor = node.left();
                }
                Ordering::Greater => {
                    remaining -= left + 1;
                    cursor = node.right();
                }
                Ordering::Equal => {
                    stack.push(handle);
                    break;
                }
            }
        }

        Iter {
            raw,
            stack,
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        if self.remaining == 0 {
            return None;
        }
        let raw = self.raw;
        let node = raw.node(self.stack.pop()?);

        let mut cursor = node.right();
        while let Some(handle) = cursor {
            self.stack.push(handle);
            cursor = raw.node(handle).left();
        }

        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the keys of an `AvlMap`, in sorted order.
///
/// This `struct` is created by the [`keys`] and [`keys_in_range`] methods on
/// [`AvlMap`]. See their documentation for more.
///
/// [`keys`]: super::AvlMap::keys
/// [`keys_in_range`]: super::AvlMap::keys_in_range
/// [`AvlMap`]: super::AvlMap
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(super) fn new(inner: Iter<'a, K, V>) -> Self {
        Keys { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the values of an `AvlMap`, in order by key.
///
/// This `struct` is created by the [`values`] method on [`AvlMap`]. See its
/// documentation for more.
///
/// [`values`]: super::AvlMap::values
/// [`AvlMap`]: super::AvlMap
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(super) fn new(inner: Iter<'a, K, V>) -> Self {
        Values { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over a sub-range of entries in an `AvlMap`.
///
/// This `struct` is created by the [`range`] method on [`AvlMap`]. See its
/// documentation for more.
///
/// [`range`]: super::AvlMap::range
/// [`AvlMap`]: super::AvlMap
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Range<'a, K: 'a, V: 'a> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Range<'a, K, V> {
    pub(super) fn new(inner: Iter<'a, K, V>) -> Self {
        Range { inner }
    }

    pub(super) fn into_inner(self) -> Iter<'a, K, V> {
        self.inner
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Range<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Range<'_, K, V> {}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Range {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Range<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// A breadth-first iterator over the entries of an `AvlMap`.
///
/// This `struct` is created by the [`level_order`] method on [`AvlMap`]. See its
/// documentation for more.
///
/// [`level_order`]: super::AvlMap::level_order
/// [`AvlMap`]: super::AvlMap
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct LevelOrder<'a, K, V> {
    raw: &'a RawAvlMap<K, V>,
    // Subtrees waiting to be visited, shallowest first.
    queue: VecDeque<Handle>,
    remaining: usize,
}

impl<'a, K, V> LevelOrder<'a, K, V> {
    pub(super) fn new(raw: &'a RawAvlMap<K, V>) -> Self {
        LevelOrder {
            raw,
            queue: raw.root().into_iter().collect(),
            remaining: raw.len(),
        }
    }
}

impl<'a, K, V> Iterator for LevelOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        let node = self.raw.node(self.queue.pop_front()?);
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for LevelOrder<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for LevelOrder<'_, K, V> {}

impl<K, V> Clone for LevelOrder<'_, K, V> {
    fn clone(&self) -> Self {
        LevelOrder {
            raw: self.raw,
            queue: self.queue.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for LevelOrder<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// A breadth-first iterator over the keys of an `AvlMap`.
///
/// This `struct` is created by the [`keys_level_order`] method on [`AvlMap`].
///
/// [`keys_level_order`]: super::AvlMap::keys_level_order
/// [`AvlMap`]: super::AvlMap
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct LevelOrderKeys<'a, K, V> {
    inner: LevelOrder<'a, K, V>,
}

impl<'a, K, V> LevelOrderKeys<'a, K, V> {
    pub(super) fn new(inner: LevelOrder<'a, K, V>) -> Self {
        LevelOrderKeys { inner }
    }
}

impl<'a, K, V> Iterator for LevelOrderKeys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for LevelOrderKeys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for LevelOrderKeys<'_, K, V> {}

impl<K, V> Clone for LevelOrderKeys<'_, K, V> {
    fn clone(&self) -> Self {
        LevelOrderKeys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for LevelOrderKeys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
