//! Ordered byte-keyed maps and the keyword dictionary built on them.
//!
//! | Type | Keys | Values |
//! |------|------|--------|
//! | [`CompressedTrie`] | arbitrary byte strings | any `V` |
//! | [`KeywordIndex`] | keywords | dense identifiers in key order |

pub mod keywords;
pub mod trie;

pub use keywords::{KeywordIndex, KeywordIndexBuilder};
pub use trie::{CompressedTrie, Iter};
