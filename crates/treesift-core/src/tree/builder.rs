//! Two-phase construction of a [`ClassificationIndex`].
//!
//! Records are collected first. [`ClassificationIndexBuilder::build`] then
//! runs the whole pipeline in one go:
//!
//! 1. link every record to its parent (fails on the first bad record)
//! 2. collect the keywords of all titles and assign identifiers
//! 3. tag each node with the identifiers of its own title
//! 4. assemble the tree and fold child keywords into parents

use std::cmp::Reverse;
use std::mem;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use treesift_common::collections::{SiftMap, sift_map_with_capacity};
use treesift_common::{Error, Result};

use super::index::ClassificationIndex;
use super::node::{ClassificationNode, Classifier};
use crate::config::{IndexConfig, Linking};
use crate::index::{KeywordIndex, KeywordIndexBuilder};
use crate::storage::succinct::SparseBitSet;
use crate::text::{TokenMode, Tokenizer, WordTokenizer};

/// One input row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique code of the entry.
    pub code: String,
    /// Code of the parent entry; empty for a top-level entry. Ignored with
    /// [`Linking::CodeLength`].
    #[serde(default)]
    pub parent: String,
    /// Title text to index.
    pub title: String,
}

impl Record {
    /// Creates a record.
    pub fn new(
        code: impl Into<String>,
        parent: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            parent: parent.into(),
            title: title.into(),
        }
    }

    /// Creates a record without a parent.
    pub fn top_level(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(code, String::new(), title)
    }
}

/// Collects records and builds a [`ClassificationIndex`].
///
/// # Example
///
/// ```
/// use treesift_core::config::IndexConfig;
/// use treesift_core::tree::{ClassificationIndexBuilder, Record};
///
/// let mut builder = ClassificationIndexBuilder::new(IndexConfig::default());
/// builder.push(Record::top_level("A", "Agriculture, forestry and fishing"));
/// builder.push(Record::new("01", "A", "Crop and animal production"));
/// builder.push(Record::new("03", "A", "Fishing and aquaculture"));
/// let index = builder.build()?;
///
/// assert_eq!(index.node_count(), 3);
/// assert_eq!(index.filter("fish").len(), 1);
/// # Ok::<(), treesift_common::Error>(())
/// ```
pub struct ClassificationIndexBuilder {
    config: IndexConfig,
    tokenizer: Arc<dyn Tokenizer>,
    records: Vec<Record>,
}

impl ClassificationIndexBuilder {
    /// Creates a builder using a [`WordTokenizer`] with the configured stop
    /// words.
    #[must_use]
    pub fn new(config: IndexConfig) -> Self {
        let tokenizer = Arc::new(WordTokenizer::from_config(&config));
        Self {
            config,
            tokenizer,
            records: Vec::new(),
        }
    }

    /// Replaces the tokenizer used for titles and queries.
    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: impl Tokenizer + 'static) -> Self {
        self.tokenizer = Arc::new(tokenizer);
        self
    }

    /// Appends a record.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Returns the number of collected records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no record was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Builds the index.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the configuration does not validate
    /// - [`Error::MalformedRecord`] for an empty or duplicate code, or a
    ///   parent code that is missing from the input or leads back to the
    ///   record itself
    /// - [`Error::KeywordNotFound`] if the tokenizer returned a keyword for a
    ///   title that it did not return while the dictionary was collected
    /// - [`Error::CapacityExceeded`] if the titles hold too many distinct
    ///   keywords
    pub fn build(self) -> Result<ClassificationIndex> {
        self.config.validate()?;

        let links = match self.config.linking {
            Linking::ParentCode => link_by_parent_code(&self.records)?,
            Linking::CodeLength => link_by_code_length(&self.records)?,
        };

        let mut dictionary = KeywordIndexBuilder::new();
        for record in &self.records {
            dictionary.extend(self.tokenizer.keywords(&record.title, TokenMode::Strict));
        }
        let keywords = dictionary.finish()?;

        let mut tagged = Vec::with_capacity(self.records.len());
        for record in self.records {
            let ids = tag(self.tokenizer.as_ref(), &keywords, &record)?;
            tagged.push(ClassificationNode::new(
                Classifier::new(record.code, record.title),
                ids,
            ));
        }

        let mut roots = assemble(tagged, &links);
        for root in &mut roots {
            root.reindex();
        }

        let index = ClassificationIndex::new(roots, keywords, self.tokenizer, self.config);
        tracing::info!(
            nodes = index.node_count(),
            keywords = index.keywords().len(),
            bytes = index.size_bytes(),
            "built classification index"
        );
        Ok(index)
    }
}

/// Returns the identifiers of the keywords in `record`'s title.
fn tag(
    tokenizer: &dyn Tokenizer,
    keywords: &KeywordIndex,
    record: &Record,
) -> Result<SparseBitSet> {
    let mut ids = SparseBitSet::new();
    for keyword in tokenizer.keywords(&record.title, TokenMode::Strict) {
        let Some(id) = keywords.id(&keyword) else {
            return Err(Error::KeywordNotFound {
                code: record.code.clone(),
                keyword,
            });
        };
        ids.set(id)?;
    }
    Ok(ids)
}

impl Extend<Record> for ClassificationIndexBuilder {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

/// Where each record sits in the tree.
#[derive(Debug, PartialEq, Eq)]
struct Links {
    /// Parent slot of each record, or `None` for a top-level record.
    parents: Vec<Option<usize>>,
    /// Distance of each record from its top-level ancestor.
    depths: Vec<usize>,
}

/// Registers `code` for `row`, rejecting empty and repeated codes.
fn register<'a>(codes: &mut SiftMap<&'a str, usize>, code: &'a str, row: usize) -> Result<()> {
    if code.is_empty() {
        return Err(Error::malformed(row, "code", "code is empty"));
    }
    if let Some(first) = codes.insert(code, row) {
        return Err(Error::malformed(
            row,
            "code",
            format!("code '{code}' already used by record {first}"),
        ));
    }
    Ok(())
}

/// Links records through their parent codes. A parent may appear before or
/// after its children.
fn link_by_parent_code(records: &[Record]) -> Result<Links> {
    let mut codes: SiftMap<&str, usize> = sift_map_with_capacity(records.len());
    for (row, record) in records.iter().enumerate() {
        register(&mut codes, &record.code, row)?;
    }

    let mut parents = Vec::with_capacity(records.len());
    for (row, record) in records.iter().enumerate() {
        if record.parent.is_empty() {
            parents.push(None);
            continue;
        }
        let Some(&slot) = codes.get(record.parent.as_str()) else {
            return Err(Error::malformed(
                row,
                "parent",
                format!("code '{}' does not appear in the input", record.parent),
            ));
        };
        parents.push(Some(slot));
    }

    let depths = depths(&parents).map_err(|row| {
        Error::malformed(
            row,
            "parent",
            format!("code '{}' is its own ancestor", records[row].code),
        )
    })?;
    Ok(Links { parents, depths })
}

/// Computes the depth of every slot, or returns a slot on a parent cycle.
fn depths(parents: &[Option<usize>]) -> std::result::Result<Vec<usize>, usize> {
    const UNSEEN: usize = usize::MAX;

    let mut depths = vec![UNSEEN; parents.len()];
    let mut chain = Vec::new();
    for start in 0..parents.len() {
        let mut slot = start;
        let mut depth = loop {
            if depths[slot] != UNSEEN {
                break depths[slot] + 1;
            }
            if chain.contains(&slot) {
                return Err(slot);
            }
            chain.push(slot);
            match parents[slot] {
                Some(parent) => slot = parent,
                None => break 0,
            }
        };
        while let Some(slot) = chain.pop() {
            depths[slot] = depth;
            depth += 1;
        }
    }
    Ok(depths)
}

/// Nests each record under the nearest preceding record with a shorter
/// code. Records with equal code length are siblings. Lengths are counted
/// in characters.
fn link_by_code_length(records: &[Record]) -> Result<Links> {
    let mut codes: SiftMap<&str, usize> = sift_map_with_capacity(records.len());
    let mut parents = Vec::with_capacity(records.len());
    let mut depths = Vec::with_capacity(records.len());
    // (slot, code length) of the open ancestors
    let mut cursor: Vec<(usize, usize)> = Vec::new();
    for (row, record) in records.iter().enumerate() {
        register(&mut codes, &record.code, row)?;
        let len = record.code.chars().count();
        while cursor.last().is_some_and(|&(_, open)| open >= len) {
            cursor.pop();
        }
        parents.push(cursor.last().map(|&(slot, _)| slot));
        depths.push(cursor.len());
        cursor.push((row, len));
    }
    Ok(Links { parents, depths })
}

/// Moves every node under its parent, keeping input order among siblings.
///
/// Nodes are attached deepest first, so every child list is complete by
/// the time its owner is moved.
fn assemble(nodes: Vec<ClassificationNode>, links: &Links) -> Vec<ClassificationNode> {
    let mut order: Vec<(usize, ClassificationNode)> = nodes.into_iter().enumerate().collect();
    order.sort_by_key(|&(slot, _)| Reverse(links.depths[slot]));

    let mut children: Vec<Vec<(usize, ClassificationNode)>> =
        links.parents.iter().map(|_| Vec::new()).collect();
    let mut roots = Vec::new();
    for (slot, mut node) in order {
        node.children = in_input_order(mem::take(&mut children[slot]));
        match links.parents[slot] {
            Some(parent) => children[parent].push((slot, node)),
            None => roots.push((slot, node)),
        }
    }
    in_input_order(roots)
}

fn in_input_order(mut nodes: Vec<(usize, ClassificationNode)>) -> Vec<ClassificationNode> {
    nodes.sort_unstable_by_key(|&(slot, _)| slot);
    nodes.into_iter().map(|(_, node)| node).collect()
}
