//! Vocabulary building from text corpora.
//!
//! This module counts tokens in first-encounter order and ranks them by
//! frequency into a capped vocabulary.

pub mod builder;
pub mod counter;

pub use builder::{create_vocabulary, VocabularyBuilder, VocabularyConfig};
pub use counter::TokenCounter;
