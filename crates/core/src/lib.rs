//! textprep-core - Core types for the textprep preprocessing pipeline
//!
//! This crate provides the data structures shared by the tokenizer and
//! training crates, independent of any file format.
//!
//! # Features
//!
//! - Frequency-ranked `Vocabulary` with forward and reverse forms
//! - Reserved symbols (`<pad>`, `<unk>`) at fixed ids
//! - A single error type with file and line context
//!
//! # Example
//!
//! ```rust
//! use textprep_core::{Vocabulary, UNK_ID};
//!
//! let vocab = Vocabulary::from_tokens(["<pad>", "<unk>", "hello"]);
//! assert_eq!(vocab.get_id("hello"), Some(2));
//! assert_eq!(vocab.id_or_unk("world"), UNK_ID);
//! ```

pub mod error;
pub use error::{PrepError, Result};

pub mod core;
pub use core::{
    Vocab, Vocabulary, BOS_TOKEN, EOS_TOKEN, NUM_TOKEN, PAD_ID, PAD_TOKEN, START_VOCAB, UNK_ID,
    UNK_TOKEN,
};
