//! Index configuration.

use std::fmt;

use treesift_common::ConfigError;

/// Stop words dropped from titles and from strict query tokenization.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "be", "by", "for", "from", "in", "into", "is", "it", "of", "on",
    "or", "the", "to", "with", "without",
];

/// How a record is attached to its parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Linking {
    /// The record names its parent's code. An empty parent means top level.
    #[default]
    ParentCode,
    /// Nesting follows code length: a record becomes a child of the nearest
    /// preceding record with a strictly shorter code.
    CodeLength,
}

impl fmt::Display for Linking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParentCode => write!(f, "parent-code"),
            Self::CodeLength => write!(f, "code-length"),
        }
    }
}

/// How a query term is turned into keyword identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TermResolution {
    /// Contiguous identifier range between the first and last keyword under
    /// the prefix. Relies on identifiers following lexicographic order.
    #[default]
    Range,
    /// Explicit set of every identifier under the prefix.
    Enumerate,
}

impl fmt::Display for TermResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range => write!(f, "range"),
            Self::Enumerate => write!(f, "enumerate"),
        }
    }
}

/// Configuration for building and querying a classification index.
///
/// # Example
///
/// ```
/// use treesift_core::config::{IndexConfig, Linking, TermResolution};
///
/// let config = IndexConfig::default()
///     .with_linking(Linking::CodeLength)
///     .with_resolution(TermResolution::Enumerate)
///     .without_lenient_fallback();
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Parent linking convention of the input records.
    pub linking: Linking,

    /// Query term resolution strategy.
    pub resolution: TermResolution,

    /// Retry a query with stop words kept when strict tokenization yields
    /// no keywords.
    pub lenient_fallback: bool,

    /// Lowercase single-token words ignored in strict tokenization.
    pub stop_words: Vec<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            linking: Linking::default(),
            resolution: TermResolution::default(),
            lenient_fallback: true,
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| (*w).to_string()).collect(),
        }
    }
}

impl IndexConfig {
    /// Sets the parent linking convention.
    #[must_use]
    pub fn with_linking(mut self, linking: Linking) -> Self {
        self.linking = linking;
        self
    }

    /// Sets the term resolution strategy.
    #[must_use]
    pub fn with_resolution(mut self, resolution: TermResolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Disables the lenient tokenization retry for queries.
    #[must_use]
    pub fn without_lenient_fallback(mut self) -> Self {
        self.lenient_fallback = false;
        self
    }

    /// Replaces the stop-word list.
    #[must_use]
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Checks that every stop word could match a token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStopWord`] for an empty entry, an entry
    /// containing a non-alphanumeric character, or one that is not lowercase.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for word in &self.stop_words {
            let is_token = !word.is_empty()
                && word.chars().all(char::is_alphanumeric)
                && word.to_lowercase() == *word;
            if !is_token {
                return Err(ConfigError::InvalidStopWord(word.clone()));
            }
        }
        Ok(())
    }
}
