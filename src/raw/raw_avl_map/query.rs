use core::borrow::Borrow;
use core::cmp::Ordering;

use super::RawAvlMap;
use crate::raw::handle::Handle;

impl<K, V> RawAvlMap<K, V> {
    /// Handle of the entry at zero-based position `rank` in key order.
    pub(crate) fn select_handle(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len() {
            return None;
        }

        let mut remaining = rank;
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = &self.nodes[handle];
            let left = self.subtree_len(node.left());
            match remaining.cmp(&left) {
                Ordering::Less => cursor = node.left(),
                Ordering::Greater => {
                    remaining -= left + 1;
                    cursor = node.right();
                }
                Ordering::Equal => return Some(handle),
            }
        }

        // Only reachable if cached sizes are stale.
        None
    }

    /// Gets an entry by its rank (0-indexed position in sorted order).
    pub(crate) fn select(&self, rank: usize) -> Option<(&K, &V)> {
        let node = &self.nodes[self.select_handle(rank)?];
        Some((&node.key, &node.value))
    }

    pub(crate) fn select_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let handle = self.select_handle(rank)?;
        let node = &mut self.nodes[handle];
        Some((&node.key, &mut node.value))
    }

    /// Leftmost (`first`) entry.
    pub(crate) fn first_key_value(&self) -> Option<(&K, &V)> {
        let mut current = self.root?;
        while let Some(left) = self.nodes[current].left() {
            current = left;
        }
        let node = &self.nodes[current];
        Some((&node.key, &node.value))
    }

    /// Rightmost (`last`) entry.
    pub(crate) fn last_key_value(&self) -> Option<(&K, &V)> {
        let mut current = self.root?;
        while let Some(right) = self.nodes[current].right() {
            current = right;
        }
        let node = &self.nodes[current];
        Some((&node.key, &node.value))
    }
}

impl<K: Ord, V> RawAvlMap<K, V> {
    /// Searches for a key and returns the handle of its node.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = &self.nodes[handle];
            cursor = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = &self.nodes[self.search(key)?];
        Some((&node.key, &node.value))
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(&mut self.nodes[handle].value)
    }

    /// Number of keys strictly less than `key`; `key` need not be present.
    pub(crate) fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut rank = 0;
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = &self.nodes[handle];
            match key.cmp(node.key.borrow()) {
                Ordering::Less => cursor = node.left(),
                Ordering::Greater => {
                    rank += 1 + self.subtree_len(node.left());
                    cursor = node.right();
                }
                Ordering::Equal => return rank + self.subtree_len(node.left()),
            }
        }
        rank
    }

    /// Largest key less than or equal to `key`.
    pub(crate) fn floor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut best = None;
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = &self.nodes[handle];
            match key.cmp(node.key.borrow()) {
                Ordering::Less => cursor = node.left(),
                Ordering::Greater => {
                    best = Some(&node.key);
                    cursor = node.right();
                }
                Ordering::Equal => return Some(&node.key),
            }
        }
        best
    }

    /// Smallest key greater than or equal to `key`.
    pub(crate) fn ceiling<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut best = None;
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = &self.nodes[handle];
            match key.cmp(node.key.borrow()) {
                Ordering::Greater => cursor = node.right(),
                Ordering::Less => {
                    best = Some(&node.key);
                    cursor = node.left();
                }
                Ordering::Equal => return Some(&node.key),
            }
        }
        best
    }
}
