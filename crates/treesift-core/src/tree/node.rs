//! Classification tree nodes.

use std::mem;

use serde::Serialize;

use super::query::QueryTerms;
use crate::storage::succinct::SparseBitSet;

/// A classification entry as returned by queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Classifier {
    /// Unique code, e.g. `01.11`.
    pub code: String,
    /// Human-readable title.
    pub title: String,
}

impl Classifier {
    /// Creates a classifier.
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
        }
    }
}

/// A node of the classification tree.
///
/// After the index is built, `keywords` holds the identifiers of every
/// keyword in this node's title and in the titles of all its descendants.
#[derive(Debug, Clone)]
pub struct ClassificationNode {
    pub(crate) classifier: Classifier,
    pub(crate) children: Vec<ClassificationNode>,
    pub(crate) keywords: SparseBitSet,
}

impl ClassificationNode {
    pub(crate) fn new(classifier: Classifier, keywords: SparseBitSet) -> Self {
        Self {
            classifier,
            children: Vec::new(),
            keywords,
        }
    }

    /// Returns the code and title.
    #[must_use]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Returns the code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.classifier.code
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.classifier.title
    }

    /// Returns the direct children in input order.
    #[must_use]
    pub fn children(&self) -> &[ClassificationNode] {
        &self.children
    }

    /// Returns the keyword identifiers of this subtree.
    #[must_use]
    pub fn keywords(&self) -> &SparseBitSet {
        &self.keywords
    }

    /// Returns `true` if every query term hits this subtree's keywords.
    #[must_use]
    pub fn matches(&self, terms: &QueryTerms) -> bool {
        terms.matches(&self.keywords)
    }

    /// Depth-first search for `code` in this subtree.
    #[must_use]
    pub fn find_by_code(&self, code: &str) -> Option<&ClassificationNode> {
        if self.classifier.code == code {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_by_code(code))
    }

    /// Folds the keywords of all descendants into each node, children
    /// first.
    pub(crate) fn reindex(&mut self) {
        for child in &mut self.children {
            child.reindex();
            self.keywords = mem::take(&mut self.keywords).union(&child.keywords);
        }
    }

    /// Returns the number of nodes in this subtree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(ClassificationNode::node_count)
            .sum::<usize>()
    }

    /// Returns the approximate memory footprint of this subtree in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.classifier.code.len()
            + self.classifier.title.len()
            + self.keywords.size_in_bytes()
            + self
                .children
                .iter()
                .map(ClassificationNode::size_bytes)
                .sum::<usize>()
    }
}
