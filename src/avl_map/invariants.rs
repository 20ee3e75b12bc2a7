use super::AvlMap;
use crate::Validation;

/// Self-checks.
///
/// Each walks the entire tree and recomputes what it verifies instead of trusting the
/// cached heights and sizes, so they cost O(n) or O(n log n). They never run as part of
/// a mutation.
impl<K: Ord, V> AvlMap<K, V> {
    /// Runs every invariant check and reports which ones failed.
    ///
    /// Each failure is also emitted as a `tracing` warning.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_table::AvlMap;
    ///
    /// let mut map: AvlMap<u32, ()> = (0..100).map(|k| (k, ())).collect();
    /// map.remove(&50);
    /// let validation = map.check();
    /// assert!(validation.is_valid(), "{validation}");
    /// ```
    #[must_use]
    pub fn check(&self) -> Validation {
        self.raw.check()
    }

    /// Returns `true` if every left subtree holds only smaller keys and every right
    /// subtree only larger keys than their parent.
    #[must_use]
    pub fn is_bst(&self) -> bool {
        self.raw.is_bst()
    }

    /// Returns `true` if every cached height is accurate and no node's subtrees differ in
    /// height by more than one.
    #[must_use]
    pub fn is_avl(&self) -> bool {
        self.raw.is_avl()
    }

    /// Returns `true` if every cached subtree size is one more than its children's.
    #[must_use]
    pub fn is_size_consistent(&self) -> bool {
        self.raw.is_size_consistent()
    }

    /// Returns `true` if `rank` and `select` invert each other over every position and
    /// every key.
    #[must_use]
    pub fn is_rank_consistent(&self) -> bool {
        self.raw.is_rank_consistent()
    }
}
