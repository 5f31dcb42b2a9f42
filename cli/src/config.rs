//! Pipeline configuration for the `run` command.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use textprep_tokenizer::{data_to_token_ids, BasicTokenizer, WhitespaceTokenizer};
use textprep_training::{create_vocabulary, VocabularyConfig};

/// Tokenizer used by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// Boundary markers, lower-casing and whitespace split
    Basic,
    /// Plain whitespace split
    Whitespace,
}

/// Paths and sizes for a vocabulary-then-ids run.
///
/// Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Corpus the vocabulary is built from and that gets encoded
    pub data_path: PathBuf,
    /// Vocabulary file
    pub vocab_path: PathBuf,
    /// Id file
    pub ids_path: PathBuf,
    /// Maximum vocabulary size
    pub max_vocab_size: usize,
    pub tokenizer: TokenizerKind,
    /// Boundary flags for the basic tokenizer
    pub bos: bool,
    pub eos: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/clean.er"),
            vocab_path: PathBuf::from("data/vocab.er"),
            ids_path: PathBuf::from("data/ids.er"),
            max_vocab_size: 8500,
            tokenizer: TokenizerKind::Whitespace,
            bos: true,
            eos: true,
        }
    }
}

impl From<&PipelineConfig> for VocabularyConfig {
    fn from(config: &PipelineConfig) -> Self {
        VocabularyConfig {
            max_size: config.max_vocab_size,
            bos: config.bos,
            eos: config.eos,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Build the vocabulary and encode the corpus with it.
    ///
    /// Each step is skipped when its output already exists.
    pub fn run(&self) -> Result<()> {
        tracing::info!(
            "Running pipeline on {} with {:?} tokenizer",
            self.data_path.display(),
            self.tokenizer
        );
        let vocab_config = VocabularyConfig::from(self);
        match self.tokenizer {
            TokenizerKind::Whitespace => self.run_with(&vocab_config, &WhitespaceTokenizer),
            TokenizerKind::Basic => {
                self.run_with(&vocab_config, &BasicTokenizer::new(self.bos, self.eos))
            }
        }
    }

    fn run_with<T: textprep_tokenizer::Tokenize>(
        &self,
        vocab_config: &VocabularyConfig,
        tokenizer: &T,
    ) -> Result<()> {
        create_vocabulary(&self.vocab_path, &self.data_path, vocab_config.max_size, tokenizer)?;
        data_to_token_ids(&self.data_path, &self.ids_path, &self.vocab_path, tokenizer)?;
        Ok(())
    }
}
