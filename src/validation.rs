//! Structured results of the tree's self-checks.

use core::fmt;

use smallvec::SmallVec;

/// A structural property every [`AvlMap`](crate::AvlMap) maintains between operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Invariant {
    /// Every key in a left subtree is smaller, and every key in a right subtree larger,
    /// than the key of the subtree's parent.
    BstOrder,
    /// Every node's cached height is correct and its children's heights differ by at
    /// most one.
    AvlBalance,
    /// Every node's cached size is one more than the sizes of its children.
    SizeConsistency,
    /// `rank(select(i)) == i` for every position and `select(rank(k)) == k` for every key.
    RankConsistency,
}

impl Invariant {
    /// All invariants, in the order [`AvlMap::check`](crate::AvlMap::check) evaluates them.
    pub const ALL: [Self; 4] = [Self::BstOrder, Self::AvlBalance, Self::SizeConsistency, Self::RankConsistency];
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BstOrder => "symmetric order",
            Self::AvlBalance => "AVL balance",
            Self::SizeConsistency => "subtree size",
            Self::RankConsistency => "rank/select",
        })
    }
}

/// Outcome of [`AvlMap::check`](crate::AvlMap::check): the invariants that failed, if any.
///
/// # Examples
///
/// ```
/// use avl_table::{AvlMap, Invariant};
///
/// let map = AvlMap::from([(1, 'a'), (2, 'b'), (3, 'c')]);
/// let validation = map.check();
///
/// assert!(validation.is_valid());
/// assert!(!validation.is_violated(Invariant::AvlBalance));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Validation {
    violations: SmallVec<[Invariant; 4]>,
}

impl Validation {
    pub(crate) fn record(&mut self, invariant: Invariant) {
        self.violations.push(invariant);
    }

    /// Returns `true` if every invariant held.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns `true` if `invariant` was found broken.
    #[must_use]
    pub fn is_violated(&self, invariant: Invariant) -> bool {
        self.violations.contains(&invariant)
    }

    /// The broken invariants, in evaluation order.
    #[must_use]
    pub fn violations(&self) -> &[Invariant] {
        &self.violations
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.violations.split_first() else {
            return f.write_str("all tree invariants hold");
        };
        write!(f, "tree invariants violated: {first}")?;
        for invariant in rest {
            write!(f, ", {invariant}")?;
        }
        Ok(())
    }
}
