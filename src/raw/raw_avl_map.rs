use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use smallvec::SmallVec;
use tracing::trace;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};

mod balance;
mod check;
mod query;

/// Inline capacity for descent stacks.
///
/// An AVL tree of `n` nodes is at most ~1.44 * log2(n + 2) tall, which is 46 for the
/// full 32-bit handle space, so 64 (a size `smallvec` supports inline) never spills.
pub(crate) const MAX_DEPTH: usize = 64;

/// One step of a descent: the node visited and the child link followed out of it.
struct PathElement {
    node: Handle,
    side: Side,
}

/// Ancestors of the node being mutated, root first.
type Path = SmallVec<[PathElement; MAX_DEPTH]>;

/// The AVL tree backing `AvlMap`.
///
/// There is no separate element count: the length is the subtree size cached on the
/// root node.
#[derive(Clone)]
pub(crate) struct RawAvlMap<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

impl<K, V> RawAvlMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes before the arena reallocates.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) fn len(&self) -> usize {
        self.subtree_len(self.root)
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Height of the whole tree: -1 when empty, 0 for a single node.
    pub(crate) fn height(&self) -> isize {
        self.subtree_height(self.root)
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        &self.nodes[handle]
    }

    /// Number of entries under `link`, zero for an absent subtree.
    #[inline]
    pub(crate) fn subtree_len(&self, link: Option<Handle>) -> usize {
        link.map_or(0, |handle| self.nodes[handle].size().to_usize())
    }

    /// Cached height of `link`, -1 for an absent subtree.
    #[inline]
    pub(crate) fn subtree_height(&self, link: Option<Handle>) -> isize {
        link.map_or(-1, |handle| isize::from(self.nodes[handle].height()))
    }

    /// Removes and returns the smallest entry.
    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let root = self.root?;
        let mut path = Path::new();
        let first = self.descend(root, Side::Left, &mut path);
        Some(self.excise(first, path))
    }

    /// Removes and returns the largest entry.
    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let root = self.root?;
        let mut path = Path::new();
        let last = self.descend(root, Side::Right, &mut path);
        Some(self.excise(last, path))
    }

    /// Follows `side` links from `start` until the link is absent, recording the path.
    fn descend(&self, start: Handle, side: Side, path: &mut Path) -> Handle {
        let mut current = start;
        while let Some(next) = self.nodes[current].child(side) {
            path.push(PathElement { node: current, side });
            current = next;
        }
        current
    }

    /// Unlinks `target` (whose ancestors are `path`) and returns its entry.
    ///
    /// A node with two children keeps its slot: the in-order successor is removed from
    /// the right subtree instead and its entry is moved into `target`.
    fn excise(&mut self, target: Handle, mut path: Path) -> (K, V) {
        let node = &self.nodes[target];
        match (node.left(), node.right()) {
            (None, replacement) | (replacement, None) => {
                let entry = self.nodes.remove(target).into_entry();
                self.unwind(path, replacement);
                entry
            }
            (Some(_), Some(right)) => {
                path.push(PathElement {
                    node: target,
                    side: Side::Right,
                });
                let successor = self.descend(right, Side::Left, &mut path);
                trace!(?target, ?successor, "splicing successor into two-child node");

                let replacement = self.nodes[successor].right();
                let (key, value) = self.nodes.remove(successor).into_entry();
                let node = &mut self.nodes[target];
                let entry = (mem::replace(&mut node.key, key), mem::replace(&mut node.value, value));
                self.unwind(path, replacement);
                entry
            }
        }
    }

    /// Re-links `subtree` under the deepest element of `path`, then refreshes and
    /// rebalances every ancestor on the way back to the root.
    fn unwind(&mut self, mut path: Path, mut subtree: Option<Handle>) {
        while let Some(PathElement { node, side }) = path.pop() {
            self.nodes[node].set_child(side, subtree);
            subtree = Some(self.rebalance(node));
        }
        self.root = subtree;
    }
}

impl<K: Ord, V> RawAvlMap<K, V> {
    /// Inserts a key-value pair into the tree.
    /// Returns the old value if the key was already present.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut path = Path::new();
        let mut cursor = self.root;

        while let Some(handle) = cursor {
            let node = &mut self.nodes[handle];
            let side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                // Overwrite in place; no height or size above this node changes.
                Ordering::Equal => return Some(mem::replace(&mut node.value, value)),
            };
            path.push(PathElement { node: handle, side });
            cursor = node.child(side);
        }

        let leaf = self.nodes.insert(Node::leaf(key, value));
        self.unwind(path, Some(leaf));
        None
    }

    /// Removes `key`, returning its entry. An absent key leaves the tree untouched.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut path = Path::new();
        let mut cursor = self.root;

        let target = loop {
            let handle = cursor?;
            let node = &self.nodes[handle];
            let side = match key.cmp(node.key.borrow()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => break handle,
            };
            path.push(PathElement { node: handle, side });
            cursor = node.child(side);
        };

        Some(self.excise(target, path))
    }
}
