//! Keyword extraction from titles and queries.
//!
//! The index never looks at raw text. Titles and queries both pass through a
//! [`Tokenizer`], so whatever normalization it applies (case folding, stop
//! words, stemming) is applied consistently on both sides.

use treesift_common::collections::{SiftSet, sift_set};

use crate::config::IndexConfig;

/// Tokenization strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenMode {
    /// Drop stop words. Used for titles and the first query pass.
    Strict,
    /// Keep every token. Used as the query fallback when the strict pass is
    /// empty, so that a query made only of stop words can still match them
    /// as prefixes of longer keywords.
    Lenient,
}

/// Splits text into normalized keywords.
pub trait Tokenizer: Send + Sync {
    /// Returns the keywords of `text` in order of appearance.
    fn keywords(&self, text: &str, mode: TokenMode) -> Vec<String>;
}

/// Lowercasing word splitter with a stop-word list.
///
/// Words are maximal runs of alphanumeric characters. No stemming is done.
///
/// # Example
///
/// ```
/// use treesift_core::text::{TokenMode, Tokenizer, WordTokenizer};
///
/// let tokenizer = WordTokenizer::new(["of"]);
/// assert_eq!(
///     tokenizer.keywords("Growing of Rice, Wheat", TokenMode::Strict),
///     vec!["growing", "rice", "wheat"]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    stop_words: SiftSet<String>,
}

impl WordTokenizer {
    /// Creates a tokenizer with the given stop words.
    pub fn new<I, S>(stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = sift_set();
        set.extend(stop_words.into_iter().map(Into::into));
        Self { stop_words: set }
    }

    /// Creates a tokenizer with the stop words of `config`.
    #[must_use]
    pub fn from_config(config: &IndexConfig) -> Self {
        Self::new(config.stop_words.iter().cloned())
    }

    /// Returns `true` if `word` is dropped in strict mode.
    #[must_use]
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::from_config(&IndexConfig::default())
    }
}

impl Tokenizer for WordTokenizer {
    fn keywords(&self, text: &str, mode: TokenMode) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(str::to_lowercase)
            .filter(|word| mode == TokenMode::Lenient || !self.is_stop_word(word))
            .collect()
    }
}
