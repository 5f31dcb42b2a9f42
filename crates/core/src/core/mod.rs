//! Core vocabulary data model.
//!
//! This module holds the symbol table shared by every stage of the
//! pipeline, together with the reserved symbols and their fixed ids.

pub mod vocab;

pub use vocab::{
    Vocab, Vocabulary, BOS_TOKEN, EOS_TOKEN, NUM_TOKEN, PAD_ID, PAD_TOKEN, START_VOCAB, UNK_ID,
    UNK_TOKEN,
};
