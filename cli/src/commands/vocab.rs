//! Vocab command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Vocab command arguments.
#[derive(Parser)]
pub struct VocabCommand {
    /// Path to the corpus file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path of the vocabulary file to create
    #[arg(short, long)]
    pub output: PathBuf,

    /// Maximum vocabulary size, reserved symbols included
    #[arg(short, long, default_value_t = 40_000)]
    pub max_size: usize,

    /// Split on whitespace only, without markers or lower-casing
    #[arg(short, long, default_value_t = false)]
    pub whitespace: bool,

    /// Do not prepend <bos> to each line
    #[arg(long, default_value_t = false)]
    pub no_bos: bool,

    /// Do not append <eos> to each line
    #[arg(long, default_value_t = false)]
    pub no_eos: bool,
}

impl From<&VocabCommand> for VocabularyConfig {
    fn from(cmd: &VocabCommand) -> Self {
        VocabularyConfig {
            max_size: cmd.max_size,
            bos: !cmd.no_bos,
            eos: !cmd.no_eos,
        }
    }
}

use anyhow::Result as AnyhowResult;
use textprep_tokenizer::{FileStatus, WhitespaceTokenizer};
use textprep_training::{VocabularyBuilder, VocabularyConfig};

pub fn run(cmd: VocabCommand) -> AnyhowResult<()> {
    let builder = VocabularyBuilder::with_config(VocabularyConfig::from(&cmd));
    let status = if cmd.whitespace {
        builder
            .tokenizer(WhitespaceTokenizer)
            .create(&cmd.output, &cmd.input)?
    } else {
        builder.create(&cmd.output, &cmd.input)?
    };

    match status {
        FileStatus::Created => println!("Vocabulary written to {}", cmd.output.display()),
        FileStatus::Skipped => println!("{} already exists, left unchanged", cmd.output.display()),
    }

    Ok(())
}
