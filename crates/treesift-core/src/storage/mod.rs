//! Storage primitives.
//!
//! - [`succinct`] - Rank-indexed bitmaps and the sparse keyword bit-set

pub mod succinct;

pub use succinct::{BlockRankIndex, ByteRankIndex, RankedBitSet, SparseBitSet};
