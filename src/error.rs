use thiserror::Error;

/// Failure of an [`AvlMap`](crate::AvlMap) operation whose precondition did not hold.
///
/// Every operation checks its precondition before touching the tree, so an error
/// always leaves the map exactly as it was. Looking up a key that is not present is
/// not an error; those operations return [`Option`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum TableError {
    /// The operation needs at least one entry.
    #[error("operation requires a non-empty table")]
    Empty,
    /// A rank was at or past the number of entries.
    #[error("rank {rank} is out of range for a table of {len} entries")]
    RankOutOfRange {
        /// The requested zero-based position.
        rank: usize,
        /// The number of entries at the time of the call.
        len: usize,
    },
}
