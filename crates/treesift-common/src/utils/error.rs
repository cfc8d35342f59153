//! Error types for index construction.
//!
//! Lookups never fail: a missing key or an unknown code is an `Option::None`.
//! The variants here cover the cases where building an index has to stop.

use std::fmt;

use thiserror::Error;

use crate::types::KeywordId;

/// Result alias used across treesift.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort index construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A title produced a keyword the finished dictionary does not know.
    ///
    /// The dictionary is built from the same titles, so this means the
    /// tokenizer returned different keywords for the same text.
    #[error("keyword '{keyword}' of node {code} is missing from the dictionary")]
    KeywordNotFound {
        /// Code of the node whose title was being indexed.
        code: String,
        /// The keyword that could not be resolved.
        keyword: String,
    },

    /// An identifier does not fit in the fixed bit-set domain.
    #[error("identifier {id} exceeds bit-set capacity of {capacity} identifiers")]
    CapacityExceeded {
        /// The rejected identifier.
        id: KeywordId,
        /// Number of addressable identifiers.
        capacity: u32,
    },

    /// An input record could not be placed in the tree.
    #[error("record {row}: invalid {field}: {reason}")]
    MalformedRecord {
        /// Zero-based position of the record in the input.
        row: usize,
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The index configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Shorthand for [`Error::MalformedRecord`].
    pub fn malformed(row: usize, field: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            row,
            field,
            reason: reason.into(),
        }
    }
}

/// Errors from `IndexConfig::validate()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A stop word is empty, contains whitespace, or is not lowercase.
    ///
    /// Tokens are lowercased before stop-word filtering, so such an entry
    /// could never match.
    InvalidStopWord(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStopWord(word) => {
                write!(
                    f,
                    "stop word '{word}' must be a single non-empty lowercase token"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
