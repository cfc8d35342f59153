//! Rank-addressed bitmaps for compact indexing.
//!
//! | Structure | Domain | Use Case |
//! |-----------|--------|----------|
//! | [`ByteRankIndex`] | 0..=255 | Child slots of a trie node |
//! | [`BlockRankIndex`] | 0..=63 | Populated branches of a sparse bit-set |
//! | [`SparseBitSet`] | 0..=262,143 | Keyword identifiers under a tree node |
//!
//! Both sparse structures store only populated entries in a `Vec` and find
//! an entry's slot with [`RankedBitSet::rank`]. Inserting a new entry uses
//! the same rank as its position, shifting the entries above it.

mod rank;
mod sparse;

pub use rank::{BlockRankIndex, ByteRankIndex, RankedBitSet};
pub use sparse::SparseBitSet;
