//! # treesift-core
//!
//! Keyword filtering for classification trees.
//!
//! Titles are tokenized into keywords, the keywords get dense identifiers in
//! lexicographic order, and every tree node stores the identifiers of its
//! subtree in a sparse bit-set. A query word then becomes an identifier
//! range, and a node matches when every range hits its bit-set.
//!
//! ## Modules
//!
//! - [`storage`] - Rank-indexed bitmaps and the sparse identifier set
//! - [`index`] - Compressed byte trie and the keyword dictionary
//! - [`text`] - Tokenizer seam and the default word tokenizer
//! - [`tree`] - Classification nodes, index building and filtering
//! - [`config`] - Index configuration
//!
//! ## Example
//!
//! ```
//! use treesift_core::config::IndexConfig;
//! use treesift_core::tree::{ClassificationIndex, Record};
//!
//! let index = ClassificationIndex::from_records(
//!     [
//!         Record::top_level("1", "red apple"),
//!         Record::top_level("2", "red car"),
//!         Record::top_level("3", "blue car"),
//!     ],
//!     IndexConfig::default(),
//! )?;
//!
//! let found: Vec<_> = index.filter("red ca").iter().map(|c| c.code.as_str()).collect();
//! assert_eq!(found, vec!["2"]);
//! # Ok::<(), treesift_common::Error>(())
//! ```

pub mod config;
pub mod index;
pub mod storage;
pub mod text;
pub mod tree;

pub use config::{IndexConfig, Linking, TermResolution};
pub use index::{CompressedTrie, KeywordIndex, KeywordIndexBuilder};
pub use storage::{RankedBitSet, SparseBitSet};
pub use tree::{ClassificationIndex, ClassificationIndexBuilder, Classifier, Record};
