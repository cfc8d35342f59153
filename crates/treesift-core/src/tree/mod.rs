//! Classification tree with per-node keyword bit-sets.
//!
//! Each node carries a [`SparseBitSet`](crate::storage::SparseBitSet) of the
//! keyword identifiers found in its own title and in every title below it.
//! Filtering a level of the tree is then one bit-set probe per node and
//! query term, with no text comparison at query time.
//!
//! - [`ClassificationIndexBuilder`] - collects [`Record`]s and builds the index
//! - [`ClassificationIndex`] - filters nodes by free-text query
//! - [`QueryTerms`] - a query resolved into identifier ranges or sets

mod builder;
mod index;
mod node;
mod query;

pub use crate::config::Linking;
pub use builder::{ClassificationIndexBuilder, Record};
pub use index::ClassificationIndex;
pub use node::{ClassificationNode, Classifier};
pub use query::{QueryTerms, TermMatch};
