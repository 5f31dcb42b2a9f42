//! Word tokenizers.
//!
//! This module provides the `Tokenize` trait that every stage of the
//! pipeline accepts, the default sentence-aware tokenizer, and a plain
//! whitespace tokenizer for pre-tokenized corpora.

use crate::pre_tokenizer::BoundaryMarker;

pub mod ids;
pub use ids::{data_to_token_ids, prepare_ids, sentence_to_token_ids, Context};

/// Turns a line of text into an ordered sequence of word tokens.
///
/// Closures of type `Fn(&str) -> Vec<String>` implement this trait, so a
/// custom tokenizer can be passed inline.
pub trait Tokenize {
    /// Split `text` into tokens.
    fn tokenize(&self, text: &str) -> Vec<String>;
}

impl<F> Tokenize for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn tokenize(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

/// Default tokenizer: sentence boundary markers, lower-casing, whitespace split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BasicTokenizer {
    marker: BoundaryMarker,
}

impl BasicTokenizer {
    /// Create a tokenizer with the given boundary flags.
    pub fn new(bos: bool, eos: bool) -> Self {
        Self {
            marker: BoundaryMarker::new(bos, eos),
        }
    }

    /// Whether `<bos>` is prepended to each line.
    pub fn bos(&self) -> bool {
        self.marker.bos()
    }

    /// Whether `<eos>` is appended to each line.
    pub fn eos(&self) -> bool {
        self.marker.eos()
    }
}

impl Tokenize for BasicTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.marker
            .mark(text)
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

/// Splits on whitespace only. No markers, no case folding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a whitespace tokenizer.
    pub fn new() -> Self {
        Self
    }
}

impl Tokenize for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

/// Tokenize `text` with the default tokenizer.
pub fn basic_tokenize(text: &str, bos: bool, eos: bool) -> Vec<String> {
    BasicTokenizer::new(bos, eos).tokenize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_world_example() {
        let tokens = basic_tokenize("Hello  World", true, true);
        assert_eq!(
            tokens,
            vec!["<bos>", "hello", "<eos>", "<bos>", "world", "<eos>"]
        );
    }

    #[test]
    fn test_no_markers() {
        let tokens = basic_tokenize("The Cat sat", false, false);
        assert_eq!(tokens, vec!["the", "cat", "sat"]);
    }

    #[test]
    fn test_bos_only() {
        let tokens = basic_tokenize("left context", true, false);
        assert_eq!(tokens, vec!["<bos>", "left", "context"]);
    }

    #[test]
    fn test_eos_only() {
        let tokens = basic_tokenize("right context", false, true);
        assert_eq!(tokens, vec!["right", "context", "<eos>"]);
    }

    #[test]
    fn test_empty_line_yields_markers() {
        assert_eq!(basic_tokenize("", true, true), vec!["<bos>", "<eos>"]);
        assert_eq!(basic_tokenize("   ", false, false), vec!["<eos>", "<bos>"]);
        assert!(basic_tokenize("", false, false).is_empty());
    }

    #[test]
    fn test_whitespace_tokenizer_keeps_case() {
        let tokenizer = WhitespaceTokenizer::new();
        assert_eq!(tokenizer.tokenize("ORG  PER\tLOC"), vec!["ORG", "PER", "LOC"]);
    }

    #[test]
    fn test_closure_tokenizer() {
        let by_comma = |text: &str| -> Vec<String> {
            text.split(',').map(|s| s.trim().to_string()).collect()
        };
        assert_eq!(by_comma.tokenize("a, b,c"), vec!["a", "b", "c"]);
    }
}
