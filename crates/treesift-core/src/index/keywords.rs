//! Keyword dictionary with order-preserving identifiers.
//!
//! Identifiers are handed out in lexicographic order of the keywords, so
//! every keyword sharing a prefix gets an identifier from one contiguous
//! range. A query term can then be resolved to `first..=last` by looking at
//! the two ends of the prefix subtree, without enumerating it.
//!
//! Assignment needs the full keyword set up front, hence the two phases:
//! collect with [`KeywordIndexBuilder`], then [`finish`] into an immutable
//! [`KeywordIndex`].
//!
//! [`finish`]: KeywordIndexBuilder::finish

use std::ops::RangeInclusive;

use serde::{Serialize, Serializer};
use treesift_common::types::{KEYWORD_CAPACITY, KeywordId, MAX_KEYWORD_ID};
use treesift_common::{Error, Result};

use super::trie::CompressedTrie;
use crate::storage::succinct::SparseBitSet;

/// Collects distinct keywords before identifiers are assigned.
#[derive(Debug, Clone, Default)]
pub struct KeywordIndexBuilder {
    pending: CompressedTrie<()>,
}

impl KeywordIndexBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a keyword. Repeated keywords are stored once.
    pub fn insert(&mut self, keyword: &str) {
        self.pending.put(keyword, ());
    }

    /// Returns the number of distinct keywords collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Assigns identifiers `1, 2, 3, ...` in lexicographic keyword order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] when there are more keywords than
    /// the bit-set domain can address.
    pub fn finish(self) -> Result<KeywordIndex> {
        let mut ids = CompressedTrie::new();
        let mut next: KeywordId = 1;
        for (keyword, _) in &self.pending {
            if next > MAX_KEYWORD_ID {
                return Err(Error::CapacityExceeded {
                    id: next,
                    capacity: KEYWORD_CAPACITY,
                });
            }
            ids.put(keyword, next);
            next += 1;
        }
        tracing::debug!(keywords = ids.len(), "assigned keyword identifiers");
        Ok(KeywordIndex { ids })
    }
}

impl<S: AsRef<str>> Extend<S> for KeywordIndexBuilder {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for keyword in iter {
            self.insert(keyword.as_ref());
        }
    }
}

/// Immutable keyword to identifier dictionary.
///
/// # Example
///
/// ```
/// use treesift_core::index::KeywordIndexBuilder;
///
/// let mut builder = KeywordIndexBuilder::new();
/// builder.extend(["carrot", "apple", "car", "cargo"]);
/// let index = builder.finish()?;
///
/// assert_eq!(index.id("apple"), Some(1));
/// assert_eq!(index.id("car"), Some(2));
/// assert_eq!(index.prefix_range("car"), Some(2..=4));
/// assert_eq!(index.prefix_range("bus"), None);
/// # Ok::<(), treesift_common::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex {
    ids: CompressedTrie<KeywordId>,
}

impl KeywordIndex {
    /// Returns the identifier of an exact keyword.
    #[must_use]
    pub fn id(&self, keyword: &str) -> Option<KeywordId> {
        self.ids.find(keyword).copied()
    }

    /// Returns the identifiers of all keywords starting with `prefix` as a
    /// contiguous range, or `None` if there are none.
    #[must_use]
    pub fn prefix_range(&self, prefix: &str) -> Option<RangeInclusive<KeywordId>> {
        let (_, &first) = self.ids.find_first_by_prefix(prefix)?;
        let (_, &last) = self.ids.find_last_by_prefix(prefix)?;
        Some(first..=last)
    }

    /// Returns the identifiers of all keywords starting with `prefix` by
    /// enumerating the prefix subtree.
    #[must_use]
    pub fn prefix_ids(&self, prefix: &str) -> SparseBitSet {
        let mut ids = SparseBitSet::new();
        // range-checked by `KeywordIndexBuilder::finish`
        for (_, &id) in self.ids.iter_prefix(prefix) {
            ids.insert(id);
        }
        ids
    }

    /// Returns the number of keywords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the dictionary is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates `(keyword, identifier)` pairs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (String, KeywordId)> + '_ {
        self.ids
            .iter()
            .map(|(key, &id)| (String::from_utf8_lossy(&key).into_owned(), id))
    }

    /// Iterates the pairs whose keyword starts with `prefix`.
    pub fn iter_prefix<'a>(
        &'a self,
        prefix: &str,
    ) -> impl Iterator<Item = (String, KeywordId)> + 'a {
        self.ids
            .iter_prefix(prefix)
            .map(|(key, &id)| (String::from_utf8_lossy(&key).into_owned(), id))
    }

    /// Returns the underlying trie.
    #[must_use]
    pub fn trie(&self) -> &CompressedTrie<KeywordId> {
        &self.ids
    }

    /// Returns the approximate memory footprint in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.ids.size_bytes()
    }
}

impl Serialize for KeywordIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.ids.serialize(serializer)
    }
}
