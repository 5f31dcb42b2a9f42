//! textprep-training - Vocabulary building and dataset preparation
//!
//! This crate builds frequency-ranked vocabularies from raw corpora and
//! turns pre-tokenized numeric files into shuffled, split datasets and
//! mini-batches ready for a training process.
//!
//! # Features
//!
//! - Insertion-ordered token counting with stable frequency ranking
//! - Idempotent vocabulary creation with a size cap
//! - Lock-step loading of ids, labels and attention weights
//! - Global softmax over attention weights
//! - Seedable shuffling, splitting and batching through `rand::Rng`
//! - Pretrained word2vec embeddings
//!
//! # Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use std::path::Path;
//! use textprep_training::{BatchIter, DatasetConfig, DatasetReader, VocabularyBuilder};
//!
//! let vocab = VocabularyBuilder::new()
//!     .max_size(100)
//!     .build_from_reader("the cat\nthe dog\n".as_bytes(), Path::new("corpus"))
//!     .unwrap();
//! assert_eq!(vocab.get_id("<pad>"), Some(0));
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let split = DatasetReader::new(DatasetConfig::new(3).train_size(1))
//!     .read_from(
//!         ("4 5\n6\n".as_bytes(), Path::new("ids")),
//!         ("1\n0\n".as_bytes(), Path::new("labels")),
//!         ("0.1\n0.9\n".as_bytes(), Path::new("attention")),
//!         &mut rng,
//!     )
//!     .unwrap();
//! assert_eq!(split.train.len(), 1);
//!
//! let batches = BatchIter::new(split.holdout, 8, 2, true, &mut rng).unwrap();
//! assert_eq!(batches.len(), 2);
//! ```

pub use textprep_core::{PrepError, Result};

// Vocabulary building
pub mod training;
pub use training::{create_vocabulary, TokenCounter, VocabularyBuilder, VocabularyConfig};

// Datasets
pub mod data;
pub use data::{
    batch_iter, read_data, Batch, BatchIter, DatasetConfig, DatasetReader, Normalization, Record,
    Split,
};

// Embeddings
pub mod embedding;
pub use embedding::{
    build_matrix, load_word2vec, prepare_pretrained_embedding, read_word2vec, EmbeddingMatrix,
    WordVectors,
};

// Persistence
pub mod dump;
pub use dump::{dump_to_file, load_from_dump};
