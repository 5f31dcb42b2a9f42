//! Mapping text to token ids.
//!
//! Every token goes through the same digit normalization used when the
//! vocabulary was built, so lookups agree with the counted symbols.

use super::{BasicTokenizer, Tokenize};
use crate::io::{load_vocabulary, open_text, AtomicFile, FileStatus};
use crate::pre_tokenizer::normalize_digits;
use std::io::{BufRead, Write};
use std::path::Path;
use textprep_core::{PrepError, Result, Vocabulary};

/// Convert a sentence to token ids.
///
/// Tokens missing from the vocabulary map to the unknown id.
pub fn sentence_to_token_ids<T>(sentence: &str, vocab: &Vocabulary, tokenizer: &T) -> Vec<u32>
where
    T: Tokenize + ?Sized,
{
    tokenizer
        .tokenize(sentence)
        .iter()
        .map(|word| vocab.id_or_unk(normalize_digits(word)))
        .collect()
}

/// Tokenize a data file and write its token ids to `target_path`.
///
/// Each input line yields one output line of space-separated ids. Nothing is
/// done when `target_path` already exists.
pub fn data_to_token_ids<T>(
    data_path: &Path,
    target_path: &Path,
    vocab_path: &Path,
    tokenizer: &T,
) -> Result<FileStatus>
where
    T: Tokenize + ?Sized,
{
    if target_path.exists() {
        tracing::debug!("{} already exists, skipping", target_path.display());
        return Ok(FileStatus::Skipped);
    }

    tracing::info!("Vectorizing data in {}", data_path.display());
    let vocab = load_vocabulary(vocab_path)?;
    let reader = open_text(data_path)?;

    let mut out = AtomicFile::create(target_path)?;
    let mut lines = 0usize;
    for line in reader.lines() {
        let line = line.map_err(|e| PrepError::io(data_path, e))?;
        let ids = sentence_to_token_ids(&line, &vocab, tokenizer);
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out.writer(), "{}", joined).map_err(|e| PrepError::io(target_path, e))?;
        lines += 1;
    }
    out.commit()?;

    tracing::info!("Wrote {} id lines to {}", lines, target_path.display());
    Ok(FileStatus::Created)
}

/// Span of a relation mention a corpus file holds.
///
/// The context decides which boundary markers the line receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// Text left of the mention: `<bos>` only
    Left,
    /// Text between the mentions: no markers
    Middle,
    /// Text right of the mention: `<eos>` only
    Right,
    /// The full sentence: both markers
    Txt,
}

impl Context {
    /// All contexts, in processing order.
    pub const ALL: [Context; 4] = [Context::Left, Context::Middle, Context::Right, Context::Txt];

    /// File suffix used for this context.
    pub fn suffix(&self) -> &'static str {
        match self {
            Context::Left => "left",
            Context::Middle => "middle",
            Context::Right => "right",
            Context::Txt => "txt",
        }
    }

    /// Tokenizer carrying this context's boundary flags.
    pub fn tokenizer(&self) -> BasicTokenizer {
        match self {
            Context::Left => BasicTokenizer::new(true, false),
            Context::Middle => BasicTokenizer::new(false, false),
            Context::Right => BasicTokenizer::new(false, true),
            Context::Txt => BasicTokenizer::new(true, true),
        }
    }
}

/// Map `clean.<context>` to `ids.<context>` in `data_dir` for every context.
pub fn prepare_ids(data_dir: &Path, vocab_path: &Path) -> Result<()> {
    for context in Context::ALL {
        let data_path = data_dir.join(format!("clean.{}", context.suffix()));
        let target_path = data_dir.join(format!("ids.{}", context.suffix()));
        data_to_token_ids(&data_path, &target_path, vocab_path, &context.tokenizer())?;
    }
    Ok(())
}
