//! Vocabulary building from a text corpus.
//!
//! The corpus is tokenized line by line, digit-only tokens are collapsed onto
//! `<num>`, and the remaining symbols are ranked by frequency behind the
//! reserved `<pad>` and `<unk>` entries.

use super::counter::TokenCounter;
use std::io::BufRead;
use std::path::Path;
use textprep_core::{PrepError, Result, Vocabulary, START_VOCAB};
use textprep_tokenizer::{
    normalize_digits, open_text, save_vocabulary, BasicTokenizer, FileStatus, Tokenize,
};

/// Configuration for building a vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabularyConfig {
    /// Maximum number of entries, reserved symbols included
    pub max_size: usize,
    /// Prepend `<bos>` to every line (default tokenizer only)
    pub bos: bool,
    /// Append `<eos>` to every line (default tokenizer only)
    pub eos: bool,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            max_size: 40_000,
            bos: true,
            eos: true,
        }
    }
}

/// Builder for creating a vocabulary.
///
/// Uses the sentence-aware `BasicTokenizer` unless another tokenizer is set.
#[derive(Clone)]
pub struct VocabularyBuilder<T = BasicTokenizer> {
    config: VocabularyConfig,
    tokenizer: T,
}

impl Default for VocabularyBuilder<BasicTokenizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl VocabularyBuilder<BasicTokenizer> {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::with_config(VocabularyConfig::default())
    }

    /// Create a builder from an existing configuration.
    pub fn with_config(config: VocabularyConfig) -> Self {
        Self {
            config,
            tokenizer: BasicTokenizer::new(config.bos, config.eos),
        }
    }

    /// Set whether `<bos>` is prepended to each line.
    pub fn bos(mut self, bos: bool) -> Self {
        self.config.bos = bos;
        self.tokenizer = BasicTokenizer::new(self.config.bos, self.config.eos);
        self
    }

    /// Set whether `<eos>` is appended to each line.
    pub fn eos(mut self, eos: bool) -> Self {
        self.config.eos = eos;
        self.tokenizer = BasicTokenizer::new(self.config.bos, self.config.eos);
        self
    }
}

impl<T: Tokenize> VocabularyBuilder<T> {
    /// Set the maximum vocabulary size.
    pub fn max_size(mut self, size: usize) -> Self {
        self.config.max_size = size;
        self
    }

    /// Replace the tokenizer. Boundary flags no longer apply.
    pub fn tokenizer<U: Tokenize>(self, tokenizer: U) -> VocabularyBuilder<U> {
        VocabularyBuilder {
            config: self.config,
            tokenizer,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &VocabularyConfig {
        &self.config
    }

    /// Build a vocabulary from an in-memory reader.
    ///
    /// `path` is used for error context only.
    pub fn build_from_reader<R: BufRead>(&self, reader: R, path: &Path) -> Result<Vocabulary> {
        build_from_reader(reader, path, self.config.max_size, &self.tokenizer)
    }

    /// Build a vocabulary from a corpus file.
    pub fn build_from_file(&self, data_path: &Path) -> Result<Vocabulary> {
        let reader = open_text(data_path)?;
        self.build_from_reader(reader, data_path)
    }

    /// Build a vocabulary from `data_path` and write it to `vocab_path`.
    ///
    /// An existing file at `vocab_path` is never overwritten.
    pub fn create(&self, vocab_path: &Path, data_path: &Path) -> Result<FileStatus> {
        create_vocabulary(vocab_path, data_path, self.config.max_size, &self.tokenizer)
    }
}

/// Create a vocabulary file from a corpus file, unless it exists already.
pub fn create_vocabulary<T>(
    vocab_path: &Path,
    data_path: &Path,
    max_size: usize,
    tokenizer: &T,
) -> Result<FileStatus>
where
    T: Tokenize + ?Sized,
{
    if vocab_path.exists() {
        tracing::debug!("{} already exists, skipping", vocab_path.display());
        return Ok(FileStatus::Skipped);
    }

    tracing::info!(
        "Creating vocabulary {} from data {}",
        vocab_path.display(),
        data_path.display()
    );
    let reader = open_text(data_path)?;
    let vocab = build_from_reader(reader, data_path, max_size, tokenizer)?;
    save_vocabulary(&vocab, vocab_path)?;

    Ok(FileStatus::Created)
}

/// The text of a corpus line: the second tab-separated field when the line
/// has a tab, otherwise the whole line.
fn line_text(line: &str) -> &str {
    let mut fields = line.split('\t');
    let first = fields.next().unwrap_or_default();
    fields.next().unwrap_or(first).trim()
}

fn build_from_reader<R, T>(
    reader: R,
    path: &Path,
    max_size: usize,
    tokenizer: &T,
) -> Result<Vocabulary>
where
    R: BufRead,
    T: Tokenize + ?Sized,
{
    if max_size < START_VOCAB.len() {
        return Err(PrepError::InvalidConfig(format!(
            "vocabulary size {} cannot hold the {} reserved symbols",
            max_size,
            START_VOCAB.len()
        )));
    }

    let mut counter = TokenCounter::new();
    for line in reader.lines() {
        let line = line.map_err(|e| PrepError::io(path, e))?;
        for word in tokenizer.tokenize(line_text(&line)) {
            counter.add_token(normalize_digits(&word));
        }
    }

    let ranked = counter
        .ranked()
        .into_iter()
        .map(|(token, _)| token)
        .filter(|token| !START_VOCAB.contains(token));

    let mut tokens: Vec<&str> = START_VOCAB.iter().copied().chain(ranked).collect();
    if tokens.len() > max_size {
        tracing::info!(
            "{} words found, truncating to {}",
            tokens.len(),
            max_size
        );
        tokens.truncate(max_size);
    }

    Ok(Vocabulary::from_tokens(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use textprep_core::{PAD_TOKEN, UNK_TOKEN};
    use textprep_tokenizer::{load_vocabulary, WhitespaceTokenizer};

    fn build(corpus: &str, max_size: usize) -> Vocabulary {
        VocabularyBuilder::new()
            .max_size(max_size)
            .build_from_reader(corpus.as_bytes(), Path::new("corpus"))
            .unwrap()
    }

    #[test]
    fn test_frequency_order() {
        let vocab = build("a a a\nb b\nc\n", 10_000);
        let tokens: Vec<&str> = vocab.iter().collect();
        assert_eq!(
            tokens,
            vec!["<pad>", "<unk>", "<bos>", "a", "<eos>", "b", "c"]
        );
    }

    #[test]
    fn test_reserved_symbols_first() {
        let vocab = build("x x x x x y\n", 100);
        assert_eq!(vocab.get_token(0), Some(PAD_TOKEN));
        assert_eq!(vocab.get_token(1), Some(UNK_TOKEN));
    }

    #[test]
    fn test_size_cap() {
        let vocab = build("a b c d e f g h\n", 5);
        assert_eq!(vocab.len(), 5);
        assert_eq!(vocab.get_token(0), Some(PAD_TOKEN));
        assert_eq!(vocab.get_token(1), Some(UNK_TOKEN));
    }

    #[test]
    fn test_cap_smaller_than_reserved_is_rejected() {
        let err = VocabularyBuilder::new()
            .max_size(1)
            .build_from_reader("a\n".as_bytes(), Path::new("corpus"))
            .unwrap_err();
        assert!(matches!(err, PrepError::InvalidConfig(_)));
    }

    #[test]
    fn test_digits_counted_as_placeholder() {
        let vocab = build("42 7 1999 word\n", 100);
        assert!(vocab.contains("<num>"));
        assert!(!vocab.contains("42"));
        assert_eq!(vocab.get_token(2), Some("<num>"));
    }

    #[test]
    fn test_tab_separated_uses_second_field() {
        let vocab = VocabularyBuilder::new()
            .bos(false)
            .eos(false)
            .build_from_reader("LABEL\tkept text\tignored\n".as_bytes(), Path::new("corpus"))
            .unwrap();
        assert!(vocab.contains("kept"));
        assert!(vocab.contains("text"));
        assert!(!vocab.contains("label"));
        assert!(!vocab.contains("ignored"));
    }

    #[test]
    fn test_blank_lines_do_not_error() {
        let vocab = build("\n   \n", 100);
        let tokens: Vec<&str> = vocab.iter().collect();
        assert_eq!(tokens, vec!["<pad>", "<unk>", "<bos>", "<eos>"]);
    }

    #[test]
    fn test_reserved_tokens_in_corpus_not_duplicated() {
        let vocab = VocabularyBuilder::new()
            .tokenizer(WhitespaceTokenizer)
            .build_from_reader("<unk> <unk> <pad> w\n".as_bytes(), Path::new("corpus"))
            .unwrap();
        let tokens: Vec<&str> = vocab.iter().collect();
        assert_eq!(tokens, vec!["<pad>", "<unk>", "w"]);
    }

    #[test]
    fn test_custom_tokenizer_keeps_case() {
        let vocab = VocabularyBuilder::new()
            .tokenizer(WhitespaceTokenizer)
            .build_from_reader("PER ORG PER\n".as_bytes(), Path::new("corpus"))
            .unwrap();
        let tokens: Vec<&str> = vocab.iter().collect();
        assert_eq!(tokens, vec!["<pad>", "<unk>", "PER", "ORG"]);
    }

    #[test]
    fn test_create_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("clean.txt");
        let vocab_path = dir.path().join("vocab.txt");
        std::fs::write(&data_path, "the cat\nthe dog\n").unwrap();

        let builder = VocabularyBuilder::new().max_size(100);
        assert_eq!(builder.create(&vocab_path, &data_path).unwrap(), FileStatus::Created);
        let first = load_vocabulary(&vocab_path).unwrap();
        assert_eq!(first.get_id("the"), Some(4));

        std::fs::write(&data_path, "completely different words\n").unwrap();
        assert_eq!(builder.create(&vocab_path, &data_path).unwrap(), FileStatus::Skipped);
        assert_eq!(load_vocabulary(&vocab_path).unwrap(), first);
    }

    #[test]
    fn test_missing_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let err = create_vocabulary(
            &dir.path().join("vocab.txt"),
            &dir.path().join("missing.txt"),
            100,
            &BasicTokenizer::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PrepError::MissingFile(_)));
    }
}
