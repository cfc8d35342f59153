//! The queryable classification index.

use std::fmt;
use std::sync::Arc;

use super::builder::{ClassificationIndexBuilder, Record};
use super::node::{ClassificationNode, Classifier};
use super::query::{QueryTerms, TermMatch};
use crate::config::{IndexConfig, TermResolution};
use crate::index::KeywordIndex;
use crate::text::{TokenMode, Tokenizer};

/// A classification tree with a keyword bit-set on every node.
///
/// Immutable once built, so it can be shared between threads and queried
/// concurrently.
///
/// # Query semantics
///
/// Every word of the query is a prefix. A node matches when, for each word,
/// some keyword starting with it occurs in the node's title or in the title
/// of one of its descendants. Nodes are evaluated independently: a parent
/// matching says nothing about its children.
///
/// | Query | Result |
/// |-------|--------|
/// | empty or whitespace | every evaluated node |
/// | only stop words | retried with stop words kept (if enabled) |
/// | a word no keyword starts with | nothing |
/// | only punctuation | nothing |
pub struct ClassificationIndex {
    roots: Vec<ClassificationNode>,
    keywords: KeywordIndex,
    tokenizer: Arc<dyn Tokenizer>,
    config: IndexConfig,
}

impl ClassificationIndex {
    pub(crate) fn new(
        roots: Vec<ClassificationNode>,
        keywords: KeywordIndex,
        tokenizer: Arc<dyn Tokenizer>,
        config: IndexConfig,
    ) -> Self {
        Self {
            roots,
            keywords,
            tokenizer,
            config,
        }
    }

    /// Builds an index from records with the default tokenizer.
    ///
    /// # Errors
    ///
    /// See [`ClassificationIndexBuilder::build`].
    pub fn from_records(
        records: impl IntoIterator<Item = Record>,
        config: IndexConfig,
    ) -> treesift_common::Result<Self> {
        let mut builder = ClassificationIndexBuilder::new(config);
        builder.extend(records);
        builder.build()
    }

    /// Returns the top-level nodes in input order.
    #[must_use]
    pub fn roots(&self) -> &[ClassificationNode] {
        &self.roots
    }

    /// Returns the keyword dictionary.
    #[must_use]
    pub fn keywords(&self) -> &KeywordIndex {
        &self.keywords
    }

    /// Returns the configuration the index was built with.
    #[must_use]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Returns the total number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(ClassificationNode::node_count).sum()
    }

    /// Finds a node by code, depth-first in input order.
    #[must_use]
    pub fn find_by_code(&self, code: &str) -> Option<&ClassificationNode> {
        self.roots.iter().find_map(|root| root.find_by_code(code))
    }

    /// Returns the top-level nodes matching `query`, in input order.
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<&Classifier> {
        match self.resolve(query) {
            Some(terms) => select(&self.roots, &terms),
            None => Vec::new(),
        }
    }

    /// Returns the direct children of the node `code` matching `query`, or
    /// `None` if there is no such node.
    #[must_use]
    pub fn filter_children(&self, code: &str, query: &str) -> Option<Vec<&Classifier>> {
        let node = self.find_by_code(code)?;
        Some(match self.resolve(query) {
            Some(terms) => select(&node.children, &terms),
            None => Vec::new(),
        })
    }

    /// Resolves `query` into terms.
    ///
    /// Returns `None` when the query cannot match anything: a word with no
    /// keyword under it, or a non-blank query without any word.
    #[must_use]
    pub fn resolve(&self, query: &str) -> Option<QueryTerms> {
        let mut terms = QueryTerms::default();
        if query.trim().is_empty() {
            return Some(terms);
        }

        let words = self.query_keywords(query);
        if words.is_empty() {
            tracing::debug!(query, "query has no keywords");
            return None;
        }
        for word in &words {
            let term = match self.config.resolution {
                TermResolution::Range => self.keywords.prefix_range(word).map(TermMatch::Range),
                TermResolution::Enumerate => {
                    let ids = self.keywords.prefix_ids(word);
                    (!ids.is_empty()).then_some(TermMatch::Set(ids))
                }
            };
            let Some(term) = term else {
                tracing::debug!(query, word = word.as_str(), "no keyword starts with query word");
                return None;
            };
            terms.push(term);
        }
        tracing::debug!(query, terms = terms.len(), "resolved query");
        Some(terms)
    }

    fn query_keywords(&self, query: &str) -> Vec<String> {
        let strict = self.tokenizer.keywords(query, TokenMode::Strict);
        if !strict.is_empty() || !self.config.lenient_fallback {
            return strict;
        }
        let lenient = self.tokenizer.keywords(query, TokenMode::Lenient);
        if !lenient.is_empty() {
            tracing::debug!(query, "query has only stop words, matching them as prefixes");
        }
        lenient
    }

    /// Returns the approximate memory footprint in bytes: node codes, titles
    /// and bit-sets, plus the keyword trie.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.roots
            .iter()
            .map(ClassificationNode::size_bytes)
            .sum::<usize>()
            + self.keywords.size_bytes()
    }
}

fn select<'a>(nodes: &'a [ClassificationNode], terms: &QueryTerms) -> Vec<&'a Classifier> {
    nodes
        .iter()
        .filter(|node| node.matches(terms))
        .map(ClassificationNode::classifier)
        .collect()
}

impl fmt::Debug for ClassificationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassificationIndex")
            .field("roots", &self.roots.len())
            .field("nodes", &self.node_count())
            .field("keywords", &self.keywords.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
