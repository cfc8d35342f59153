//! Resolved query terms.
//!
//! A query is a conjunction of terms. Each term is the set of keyword
//! identifiers whose keyword starts with the typed word, so a node matches
//! when its bit-set hits every term at least once.

use std::ops::RangeInclusive;

use smallvec::SmallVec;
use treesift_common::types::KeywordId;

use crate::storage::succinct::SparseBitSet;

/// Identifiers accepted by one query term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermMatch {
    /// Every identifier in a contiguous range.
    Range(RangeInclusive<KeywordId>),
    /// An explicit identifier set.
    Set(SparseBitSet),
}

impl TermMatch {
    /// Returns `true` if `keywords` contains at least one accepted
    /// identifier.
    #[must_use]
    pub fn matches(&self, keywords: &SparseBitSet) -> bool {
        match self {
            Self::Range(range) => keywords.intersects_range(range.clone()),
            Self::Set(ids) => keywords.intersects(ids),
        }
    }
}

/// All terms of a resolved query.
///
/// No terms means an empty query, which matches every node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryTerms {
    terms: SmallVec<[TermMatch; 4]>,
}

impl QueryTerms {
    pub(crate) fn push(&mut self, term: TermMatch) {
        self.terms.push(term);
    }

    /// Returns the number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` for an empty query.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterates the terms in query order.
    pub fn iter(&self) -> impl Iterator<Item = &TermMatch> {
        self.terms.iter()
    }

    /// Returns `true` if every term hits `keywords`.
    #[must_use]
    pub fn matches(&self, keywords: &SparseBitSet) -> bool {
        self.terms.iter().all(|term| term.matches(keywords))
    }
}
