//! textprep-tokenizer - Tokenization and id mapping
//!
//! This crate turns raw corpus lines into word tokens and token ids, and
//! reads and writes the flat vocabulary files the rest of the pipeline
//! shares.
//!
//! # Features
//!
//! - Sentence boundary markers from double-space separators
//! - Digit normalization onto a single `<num>` placeholder
//! - Pluggable tokenizers through the `Tokenize` trait
//! - Idempotent, atomically written id files
//!
//! # Example
//!
//! ```rust
//! use textprep_tokenizer::{basic_tokenize, sentence_to_token_ids, BasicTokenizer};
//! use textprep_core::Vocabulary;
//!
//! let tokens = basic_tokenize("Hello  World", true, true);
//! assert_eq!(tokens, ["<bos>", "hello", "<eos>", "<bos>", "world", "<eos>"]);
//!
//! let vocab = Vocabulary::from_tokens(["<pad>", "<unk>", "hello"]);
//! let ids = sentence_to_token_ids("hello there", &vocab, &BasicTokenizer::new(false, false));
//! assert_eq!(ids, [2, 1]);
//! ```

// Re-export core types
pub use textprep_core::{PrepError, Result, Vocabulary};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{
    basic_tokenize, data_to_token_ids, prepare_ids, sentence_to_token_ids, BasicTokenizer,
    Context, Tokenize, WhitespaceTokenizer,
};

// IO
pub mod io;
pub use io::{
    load_vocabulary, open_text, save_vocabulary, AtomicFile, FileStatus, VocabularyLoader,
    VocabularySaver,
};

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::{is_digit_token, normalize_digits, BoundaryMarker};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
