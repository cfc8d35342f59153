//! Fixed-domain presence bitmap with O(1) rank.
//!
//! A [`RankedBitSet`] marks which of a small, closed set of positions are
//! present. Its [`rank`](RankedBitSet::rank) turns a sparse position into a
//! dense slot number, so a node can keep one `Vec` entry per present
//! position instead of a full array.
//!
//! # Rank as slot
//!
//! ```text
//! mask       0 0 1 0 0 1 1 0
//! position   7 6 5 4 3 2 1 0
//! slot       - - 2 - - 1 0 -
//! ```
//!
//! For a present position `rank` is the slot holding its entry. For an
//! absent position it is the slot where a new entry has to be inserted to
//! keep the entries in position order. Both cases use the same formula.
//!
//! # Performance
//!
//! - `set`, `is_set`: O(1)
//! - `rank(pos)`: one masked popcount plus a popcount per lower word

use std::fmt;
use std::ops::BitOr;

/// Number of bits per storage word.
const WORD_BITS: usize = 64;

/// Presence bitmap over positions `0..WORDS * 64` with rank support.
///
/// The domain is part of the type. Passing a position outside it is a
/// programming error and panics.
///
/// # Example
///
/// ```
/// use treesift_core::storage::succinct::ByteRankIndex;
///
/// let mut index = ByteRankIndex::new();
/// index.set(1);
/// index.set(2);
/// index.set(5);
///
/// assert_eq!(index.rank(2), 1); // slot of an existing entry
/// assert_eq!(index.rank(3), 2); // insertion slot for a new one
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RankedBitSet<const WORDS: usize> {
    words: [u64; WORDS],
}

/// Rank index over byte values, used to address trie children.
pub type ByteRankIndex = RankedBitSet<4>;

/// Rank index over 64 positions, used for each level of a sparse bit-set.
pub type BlockRankIndex = RankedBitSet<1>;

impl<const WORDS: usize> RankedBitSet<WORDS> {
    /// Number of positions in the domain.
    pub const CAPACITY: usize = WORDS * WORD_BITS;

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { words: [0; WORDS] }
    }

    #[inline]
    fn split(pos: usize) -> (usize, usize) {
        assert!(
            pos < Self::CAPACITY,
            "position {pos} is outside the rank domain 0..{}",
            Self::CAPACITY
        );
        (pos / WORD_BITS, pos % WORD_BITS)
    }

    /// Marks `pos` as present. No-op if it already is.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the domain.
    #[inline]
    pub fn set(&mut self, pos: usize) {
        let (word, bit) = Self::split(pos);
        self.words[word] |= 1 << bit;
    }

    /// Marks `pos` as absent.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the domain.
    #[inline]
    pub fn unset(&mut self, pos: usize) {
        let (word, bit) = Self::split(pos);
        self.words[word] &= !(1 << bit);
    }

    /// Returns whether `pos` is present.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the domain.
    #[inline]
    #[must_use]
    pub fn is_set(&self, pos: usize) -> bool {
        let (word, bit) = Self::split(pos);
        self.words[word] & (1 << bit) != 0
    }

    /// Returns the number of present positions strictly below `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the domain.
    #[inline]
    #[must_use]
    pub fn rank(&self, pos: usize) -> usize {
        let (word, bit) = Self::split(pos);
        let mask = (1u64 << bit) - 1;
        let below: u32 = self.words[..word].iter().map(|w| w.count_ones()).sum();
        (below + (self.words[word] & mask).count_ones()) as usize
    }

    /// Returns the number of present positions.
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if no position is present.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Iterates present positions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some(i * WORD_BITS + bit)
            })
        })
    }
}

impl<const WORDS: usize> Default for RankedBitSet<WORDS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const WORDS: usize> BitOr for RankedBitSet<WORDS> {
    type Output = Self;

    fn bitor(mut self, rhs: Self) -> Self {
        for (word, other) in self.words.iter_mut().zip(rhs.words) {
            *word |= other;
        }
        self
    }
}

impl<const WORDS: usize> fmt::Debug for RankedBitSet<WORDS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
