//! Three-level sparse bit-set over keyword identifiers.
//!
//! An identifier is split into three 6-bit digits:
//!
//! ```text
//! id = | block (6) | word (6) | bit (6) |
//!        level 0     level 1    level 2
//! ```
//!
//! Level 0 is a [`BlockRankIndex`] saying which of the 64 blocks exist.
//! Each present block holds another [`BlockRankIndex`] for its 64 words and
//! a dense `Vec<u64>` of the words that exist, addressed by rank. A block or
//! word is only stored while at least one bit under it is set.
//!
//! # Space
//!
//! | Part | Bytes |
//! |------|-------|
//! | Level-0 mask | 8 |
//! | Per block | 8 (mask) + 8 per stored word |
//!
//! A node whose subtree mentions a few dozen keywords costs well under a
//! kilobyte, against 32 KB for a flat bitmap over the same domain.

use std::ops::RangeInclusive;

use treesift_common::types::{KEYWORD_CAPACITY, KeywordId};
use treesift_common::{Error, Result};

use super::rank::BlockRankIndex;

/// Splits an identifier into (block, word, bit) digits.
#[inline]
fn split(id: KeywordId) -> (usize, usize, usize) {
    let id = id as usize;
    (id >> 12, (id >> 6) & 0x3F, id & 0x3F)
}

/// Level-1 node: the populated words of one 4096-identifier block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Block {
    index: BlockRankIndex,
    words: Vec<u64>,
}

impl Block {
    fn set(&mut self, word: usize, bit: usize) {
        let slot = self.index.rank(word);
        if !self.index.is_set(word) {
            self.words.insert(slot, 0);
            self.index.set(word);
        }
        self.words[slot] |= 1 << bit;
    }

    fn word(&self, word: usize) -> u64 {
        if self.index.is_set(word) {
            self.words[self.index.rank(word)]
        } else {
            0
        }
    }

    fn union(&self, other: &Self) -> Self {
        let mut out = Self::default();
        for word in (self.index | other.index).iter() {
            let bits = self.word(word) | other.word(word);
            if bits != 0 {
                out.index.set(word);
                out.words.push(bits);
            }
        }
        out
    }

    fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn size_in_bytes(&self) -> usize {
        8 + self.words.len() * 8
    }
}

/// Sparse set of keyword identifiers in `0..=262_143`.
///
/// # Example
///
/// ```
/// use treesift_core::storage::succinct::SparseBitSet;
///
/// let mut a = SparseBitSet::new();
/// a.set(3)?;
/// a.set(100_000)?;
///
/// let mut b = SparseBitSet::new();
/// b.set(4)?;
///
/// let both = a.union(&b);
/// assert!(both.is_set(3) && both.is_set(4) && both.is_set(100_000));
/// assert!(a.set(262_144).is_err());
/// # Ok::<(), treesift_common::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseBitSet {
    index: BlockRankIndex,
    blocks: Vec<Block>,
}

impl SparseBitSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] for the first identifier above
    /// 262,143.
    pub fn from_ids(ids: impl IntoIterator<Item = KeywordId>) -> Result<Self> {
        let mut set = Self::new();
        for id in ids {
            set.set(id)?;
        }
        Ok(set)
    }

    /// Adds `id`, allocating its block and word on first use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] if `id` is above 262,143. The set
    /// is left unchanged.
    pub fn set(&mut self, id: KeywordId) -> Result<()> {
        if id >= KEYWORD_CAPACITY {
            return Err(Error::CapacityExceeded {
                id,
                capacity: KEYWORD_CAPACITY,
            });
        }
        self.insert(id);
        Ok(())
    }

    /// Adds an identifier already known to be inside the domain.
    ///
    /// # Panics
    ///
    /// Panics if `id` is above 262,143.
    pub(crate) fn insert(&mut self, id: KeywordId) {
        let (block, word, bit) = split(id);
        let slot = self.index.rank(block);
        if !self.index.is_set(block) {
            self.blocks.insert(slot, Block::default());
            self.index.set(block);
        }
        self.blocks[slot].set(word, bit);
    }

    /// Returns whether `id` is present. Identifiers outside the domain are
    /// never present.
    #[must_use]
    pub fn is_set(&self, id: KeywordId) -> bool {
        if id >= KEYWORD_CAPACITY {
            return false;
        }
        let (block, word, bit) = split(id);
        self.block(block)
            .is_some_and(|b| b.word(word) & (1 << bit) != 0)
    }

    fn block(&self, block: usize) -> Option<&Block> {
        self.index
            .is_set(block)
            .then(|| &self.blocks[self.index.rank(block)])
    }

    /// Returns a new set holding the identifiers of either operand.
    ///
    /// Only blocks that are non-empty after the union are materialized.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = Self::new();
        let empty = Block::default();
        for block in (self.index | other.index).iter() {
            let left = self.block(block).unwrap_or(&empty);
            let right = other.block(block).unwrap_or(&empty);
            let merged = left.union(right);
            if !merged.is_empty() {
                out.index.set(block);
                out.blocks.push(merged);
            }
        }
        out
    }

    /// Returns `true` if any identifier is in both sets.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.index.iter().any(|block| {
            let (Some(left), Some(right)) = (self.block(block), other.block(block)) else {
                return false;
            };
            left.index
                .iter()
                .any(|word| left.word(word) & right.word(word) != 0)
        })
    }

    /// Returns `true` if any identifier in `range` is present.
    ///
    /// Only stored blocks and words are visited, each tested with a single
    /// masked AND, so a wide range over a sparse set stays cheap.
    #[must_use]
    pub fn intersects_range(&self, range: RangeInclusive<KeywordId>) -> bool {
        let (first, last) = (*range.start(), (*range.end()).min(KEYWORD_CAPACITY - 1));
        if first > last {
            return false;
        }
        let (first_word, last_word) = (first as usize >> 6, last as usize >> 6);
        self.index
            .iter()
            .zip(&self.blocks)
            .skip_while(|&(block, _)| block < first_word >> 6)
            .take_while(|&(block, _)| block <= last_word >> 6)
            .any(|(block, stored)| {
                stored
                    .index
                    .iter()
                    .zip(&stored.words)
                    .map(|(word, &bits)| (block << 6 | word, bits))
                    .skip_while(|&(global, _)| global < first_word)
                    .take_while(|&(global, _)| global <= last_word)
                    .any(|(global, bits)| {
                        let mut mask = u64::MAX;
                        if global == first_word {
                            mask &= u64::MAX << (first & 0x3F);
                        }
                        if global == last_word {
                            mask &= u64::MAX >> (63 - (last & 0x3F));
                        }
                        bits & mask != 0
                    })
            })
    }

    /// Returns the number of identifiers in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(|b| b.words.iter())
            .map(|w| w.count_ones() as usize)
            .sum()
    }

    /// Returns `true` if the set holds no identifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterates identifiers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = KeywordId> + '_ {
        self.index
            .iter()
            .zip(&self.blocks)
            .flat_map(|(block, stored)| {
                stored
                    .index
                    .iter()
                    .zip(&stored.words)
                    .flat_map(move |(word, &bits)| {
                        let base = (block << 12 | word << 6) as KeywordId;
                        (0..64)
                            .filter(move |bit| bits & (1u64 << bit) != 0)
                            .map(move |bit| base + bit)
                    })
            })
    }

    /// Returns the storage footprint in bytes, for capacity reporting.
    #[must_use]
    pub fn size_in_bytes(&self) -> usize {
        8 + self.blocks.iter().map(Block::size_in_bytes).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeSet;

    fn set_of(ids: &[KeywordId]) -> SparseBitSet {
        SparseBitSet::from_ids(ids.iter().copied()).unwrap()
    }

    fn check_against(set: &SparseBitSet, expected: &BTreeSet<KeywordId>) {
        for id in 0..=KEYWORD_CAPACITY {
            assert_eq!(set.is_set(id), expected.contains(&id), "at id {id}");
        }
    }

    #[test]
    fn test_empty() {
        let set = SparseBitSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(!set.is_set(0));
        assert_eq!(set.size_in_bytes(), 8);
    }

    #[test]
    fn test_is_set_matches_inserted_ids() {
        let cases: [&[KeywordId]; 4] = [
            &[],
            &[0, 63, 64],
            &[4095, 2048, 2047, 1024, 1023],
            &[200_000, 100_000, 8192, 8191, 4095, 2048, 2047, 1024, 1023],
        ];
        for ids in cases {
            let set = set_of(ids);
            check_against(&set, &ids.iter().copied().collect());
            assert_eq!(set.len(), ids.len());
        }
    }

    #[test]
    fn test_capacity_boundary() {
        let mut set = SparseBitSet::new();
        assert!(set.set(262_143).is_ok());
        assert!(set.is_set(262_143));

        let err = set.set(262_144).unwrap_err();
        assert_eq!(
            err,
            Error::CapacityExceeded {
                id: 262_144,
                capacity: 262_144
            }
        );
        assert_eq!(set.len(), 1);
        assert!(!set.is_set(262_144));
    }

    #[test]
    fn test_union() {
        let cases: [(&[KeywordId], &[KeywordId]); 4] = [
            (&[], &[]),
            (&[0, 64, 127], &[63, 64, 127, 128]),
            (&[4095, 2048, 1024, 1023], &[4095, 2047, 1024]),
            (
                &[100_000, 8192, 4095, 2048, 1024, 1023],
                &[200_000, 8192, 8191, 2048, 2047, 1024],
            ),
        ];
        for (left, right) in cases {
            let union = set_of(left).union(&set_of(right));
            let expected: BTreeSet<KeywordId> = left.iter().chain(right).copied().collect();
            check_against(&union, &expected);
            assert_eq!(union.iter().collect::<Vec<_>>(), expected.into_iter().collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_union_keeps_sparsity() {
        let union = SparseBitSet::new().union(&SparseBitSet::new());
        assert!(union.is_empty());
        assert!(union.blocks.is_empty());

        let union = set_of(&[5]).union(&SparseBitSet::new());
        assert_eq!(union.blocks.len(), 1);
        assert_eq!(union.blocks[0].words.len(), 1);
    }

    #[test]
    fn test_iter_ascending() {
        let set = set_of(&[70_000, 1, 4096, 65, 64]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 64, 65, 4096, 70_000]);
    }

    #[test]
    fn test_intersects() {
        let a = set_of(&[10, 5000, 90_000]);
        assert!(a.intersects(&set_of(&[90_000])));
        assert!(a.intersects(&set_of(&[1, 5000])));
        assert!(!a.intersects(&set_of(&[11, 5001, 90_001])));
        assert!(!a.intersects(&SparseBitSet::new()));
    }

    #[test]
    fn test_intersects_range() {
        let set = set_of(&[100, 4200]);

        assert!(set.intersects_range(100..=100));
        assert!(set.intersects_range(0..=100));
        assert!(set.intersects_range(101..=4200));
        assert!(set.intersects_range(1..=262_143));
        assert!(!set.intersects_range(0..=99));
        assert!(!set.intersects_range(101..=4199));
        assert!(!set.intersects_range(4201..=262_143));
        assert!(!set.intersects_range(5..=1));
    }

    #[test]
    fn test_intersects_range_skips_absent_blocks() {
        // blocks 0, 20 and 63 stored; everything between them absent
        let set = set_of(&[5, 20 * 4096 + 130, 262_100]);

        assert!(set.intersects_range(6..=262_143));
        assert!(set.intersects_range(4096..=20 * 4096 + 130));
        assert!(!set.intersects_range(6..=20 * 4096 + 129));
        assert!(!set.intersects_range(20 * 4096 + 131..=262_099));
        assert!(set.intersects_range(20 * 4096 + 131..=262_100));
        assert!(!SparseBitSet::new().intersects_range(0..=262_143));

        let ids = [5, 20 * 4096 + 130, 262_100];
        for first in (0..262_144).step_by(997) {
            for width in [0, 63, 64, 4095, 70_000] {
                let last = first + width;
                let expected = ids.iter().any(|id| (first..=last).contains(id));
                assert_eq!(set.intersects_range(first..=last), expected, "{first}..={last}");
            }
        }
    }

    #[test]
    fn test_intersects_range_word_edges() {
        let set = set_of(&[63, 64, 262_143]);
        assert!(set.intersects_range(0..=63));
        assert!(set.intersects_range(64..=64));
        assert!(!set.intersects_range(65..=127));
        assert!(set.intersects_range(262_143..=262_143));
        assert!(!set.intersects_range(200_000..=262_142));
    }

    #[test]
    fn test_size_in_bytes() {
        // one block, two words
        let set = set_of(&[0, 1, 64]);
        assert_eq!(set.size_in_bytes(), 8 + 8 + 2 * 8);

        // two blocks, one word each
        let set = set_of(&[0, 4096]);
        assert_eq!(set.size_in_bytes(), 8 + 2 * (8 + 8));
    }
}
