use tracing::trace;

use super::RawAvlMap;
use crate::raw::handle::Handle;
use crate::raw::node::Side;
use crate::raw::size::Size;

impl<K, V> RawAvlMap<K, V> {
    /// Recomputes the cached height and size of `handle` from its children, then
    /// restores the AVL property at that node.
    ///
    /// Returns the root of the rebalanced subtree, which the caller must store in
    /// place of `handle`.
    pub(super) fn rebalance(&mut self, handle: Handle) -> Handle {
        self.refresh(handle);
        self.balance(handle)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn refresh(&mut self, handle: Handle) {
        let node = &self.nodes[handle];
        let (left, right) = (node.left(), node.right());
        let height = 1 + self.subtree_height(left).max(self.subtree_height(right));
        let size = Size::joining(self.subtree_len(left), self.subtree_len(right));
        self.nodes[handle].set_stats(height as u8, size);
    }

    pub(super) fn balance_factor(&self, handle: Handle) -> isize {
        let node = &self.nodes[handle];
        self.subtree_height(node.left()) - self.subtree_height(node.right())
    }

    /// Restores `|balance_factor| <= 1` at a node whose children are already AVL trees
    /// and whose own metadata is fresh.
    fn balance(&mut self, handle: Handle) -> Handle {
        let factor = self.balance_factor(handle);
        if factor < -1 {
            let right = self.nodes[handle].right().expect("`RawAvlMap::balance()` - right-heavy node has no right child!");
            if self.balance_factor(right) > 0 {
                let lifted = self.rotate_right(right);
                self.nodes[handle].set_child(Side::Right, Some(lifted));
            }
            self.rotate_left(handle)
        } else if factor > 1 {
            let left = self.nodes[handle].left().expect("`RawAvlMap::balance()` - left-heavy node has no left child!");
            if self.balance_factor(left) < 0 {
                let lifted = self.rotate_left(left);
                self.nodes[handle].set_child(Side::Left, Some(lifted));
            }
            self.rotate_right(handle)
        } else {
            handle
        }
    }

    /// Lifts the right child of `handle` into its place.
    fn rotate_left(&mut self, handle: Handle) -> Handle {
        let pivot = self.nodes[handle].right().expect("`RawAvlMap::rotate_left()` - no right child!");
        trace!(?handle, ?pivot, "rotate left");
        let inner = self.nodes[pivot].left();
        self.nodes[handle].set_child(Side::Right, inner);
        self.nodes[pivot].set_child(Side::Left, Some(handle));
        // The demoted node first: the pivot's metadata is derived from it.
        self.refresh(handle);
        self.refresh(pivot);
        pivot
    }

    /// Lifts the left child of `handle` into its place.
    fn rotate_right(&mut self, handle: Handle) -> Handle {
        let pivot = self.nodes[handle].left().expect("`RawAvlMap::rotate_right()` - no left child!");
        trace!(?handle, ?pivot, "rotate right");
        let inner = self.nodes[pivot].right();
        self.nodes[handle].set_child(Side::Left, inner);
        self.nodes[pivot].set_child(Side::Right, Some(handle));
        self.refresh(handle);
        self.refresh(pivot);
        pivot
    }
}
