use alloc::vec::Vec;

use tracing::warn;

use super::RawAvlMap;
use crate::raw::handle::Handle;
use crate::validation::{Invariant, Validation};

// Every checker walks the whole tree and trusts none of the cached metadata it is
// checking. They are diagnostics, not part of any mutation path.
impl<K: Ord, V> RawAvlMap<K, V> {
    pub(crate) fn check(&self) -> Validation {
        let mut validation = Validation::default();
        for invariant in Invariant::ALL {
            let holds = match invariant {
                Invariant::BstOrder => self.is_bst(),
                Invariant::AvlBalance => self.is_avl(),
                Invariant::SizeConsistency => self.is_size_consistent(),
                Invariant::RankConsistency => self.is_rank_consistent(),
            };
            if !holds {
                warn!(%invariant, len = self.len(), slots = self.nodes.len(), "tree invariant violated");
                validation.record(invariant);
            }
        }
        validation
    }

    pub(crate) fn is_bst(&self) -> bool {
        self.ordered_within(self.root, None, None)
    }

    /// Open-interval check; `None` is an absent bound, never a key.
    fn ordered_within(&self, link: Option<Handle>, lower: Option<&K>, upper: Option<&K>) -> bool {
        let Some(handle) = link else {
            return true;
        };
        let node = &self.nodes[handle];
        if lower.is_some_and(|lower| node.key <= *lower) || upper.is_some_and(|upper| node.key >= *upper) {
            return false;
        }
        self.ordered_within(node.left(), lower, Some(&node.key))
            && self.ordered_within(node.right(), Some(&node.key), upper)
    }

    pub(crate) fn is_avl(&self) -> bool {
        self.checked_height(self.root).is_some()
    }

    /// Recomputed height of `link`, or `None` if any node below is unbalanced or caches
    /// a stale height.
    fn checked_height(&self, link: Option<Handle>) -> Option<isize> {
        let Some(handle) = link else {
            return Some(-1);
        };
        let node = &self.nodes[handle];
        let left = self.checked_height(node.left())?;
        let right = self.checked_height(node.right())?;
        let height = 1 + left.max(right);
        ((left - right).abs() <= 1 && isize::from(node.height()) == height).then_some(height)
    }

    pub(crate) fn is_size_consistent(&self) -> bool {
        self.checked_size(self.root).is_some()
    }

    fn checked_size(&self, link: Option<Handle>) -> Option<usize> {
        let Some(handle) = link else {
            return Some(0);
        };
        let node = &self.nodes[handle];
        let size = 1 + self.checked_size(node.left())? + self.checked_size(node.right())?;
        (node.size().to_usize() == size).then_some(size)
    }

    pub(crate) fn is_rank_consistent(&self) -> bool {
        let positions = (0..self.len()).all(|rank| self.select(rank).is_some_and(|(key, _)| self.rank(key) == rank));
        positions
            && self.preorder().into_iter().all(|handle| {
                let key = &self.nodes[handle].key;
                self.select(self.rank(key)).is_some_and(|(found, _)| found == key)
            })
    }

    /// Every reachable handle, found by following links rather than cached sizes.
    fn preorder(&self) -> Vec<Handle> {
        let mut handles = Vec::new();
        let mut stack: Vec<Handle> = self.root.into_iter().collect();
        while let Some(handle) = stack.pop() {
            handles.push(handle);
            let node = &self.nodes[handle];
            stack.extend(node.right());
            stack.extend(node.left());
        }
        handles
    }
}
