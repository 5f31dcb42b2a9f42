//! Reading and writing pipeline files.
//!
//! This module provides loading and saving of vocabulary files, plus the
//! atomic writer every file-producing step goes through.

pub mod load;
pub mod save;

pub use load::{load_vocabulary, open_text, VocabularyLoader};
pub use save::{save_vocabulary, AtomicFile, FileStatus, VocabularySaver};
