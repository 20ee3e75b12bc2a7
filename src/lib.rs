//! A height-balanced (AVL) order-statistic symbol table for Rust.
//!
//! This crate provides [`AvlMap`], an ordered map that keeps every node's two subtrees
//! within one level of each other and caches subtree sizes, so that besides the usual
//! map operations it answers order-statistic queries in O(log n):
//!
//! - [`select`](AvlMap::select) - the key at a given sorted position
//! - [`rank`](AvlMap::rank) - the number of keys smaller than a given key
//! - [`floor`](AvlMap::floor) / [`ceiling`](AvlMap::ceiling) - nearest keys at or
//!   below / at or above a given key
//! - [`size_in_range`](AvlMap::size_in_range) - how many keys fall in `[lo, hi]`
//! - Indexing by [`Rank`] - e.g., `map[Rank(0)]` for the value of the smallest key
//!
//! # Example
//!
//! ```
//! use avl_table::{AvlMap, Rank};
//!
//! let mut table = AvlMap::new();
//! for (i, key) in ["S", "E", "A", "R", "C", "H"].into_iter().enumerate() {
//!     table.insert(key, i);
//! }
//!
//! assert_eq!(table.keys().copied().collect::<Vec<_>>(), ["A", "C", "E", "H", "R", "S"]);
//! assert!(table.height() <= 2);
//!
//! assert_eq!(table.rank(&"E"), 2);
//! assert_eq!(table.select(2), Ok(&"E"));
//! assert_eq!(table.floor(&"D"), Some(&"C"));
//! assert_eq!(table.ceiling(&"D"), Some(&"E"));
//! assert_eq!(table[Rank(0)], 2); // "A" was inserted third
//!
//! assert!(table.check().is_valid());
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Familiar API** - Map operations mirror `std::collections::BTreeMap`
//! - **O(log n) rank operations** - Subtree sizes are cached on every node
//! - **Self-checking** - [`AvlMap::check`] re-derives every structural invariant and
//!   reports which ones fail
//!
//! # Implementation
//!
//! Nodes live in an arena and link to their children by compact handles. Mutations
//! descend iteratively while recording the path, then walk it back up refreshing heights
//! and sizes and applying single or double rotations wherever a node's balance factor
//! leaves `[-1, 1]`. Deleting a node with two children moves its in-order successor's
//! entry into it (Hibbard deletion).
//!
//! Rotations and successor splices are reported through [`tracing`] at `trace` level, and
//! failed self-checks at `warn` level. The crate never installs a subscriber.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

// The proptest macros expand to `std` paths.
#[cfg(test)]
extern crate std;

mod error;
mod order_statistic;
mod raw;

pub mod avl_map;
pub mod validation;

pub use avl_map::AvlMap;
pub use error::TableError;
pub use order_statistic::Rank;
pub use validation::{Invariant, Validation};
