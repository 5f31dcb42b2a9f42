//! Encode command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    /// Path to the vocabulary file
    #[arg(short, long)]
    pub vocab: PathBuf,

    /// Path to the text file to encode
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path of the id file to create
    #[arg(short, long)]
    pub output: PathBuf,

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

use anyhow::Result as AnyhowResult;
use textprep_tokenizer::{data_to_token_ids, BasicTokenizer, FileStatus, WhitespaceTokenizer};

pub fn run(cmd: EncodeCommand) -> AnyhowResult<()> {
    let status = if cmd.whitespace {
        data_to_token_ids(&cmd.input, &cmd.output, &cmd.vocab, &WhitespaceTokenizer)?
    } else {
        let tokenizer = BasicTokenizer::new(!cmd.no_bos, !cmd.no_eos);
        data_to_token_ids(&cmd.input, &cmd.output, &cmd.vocab, &tokenizer)?
    };

    match status {
        FileStatus::Created => println!("Token ids written to {}", cmd.output.display()),
        FileStatus::Skipped => println!("{} already exists, left unchanged", cmd.output.display()),
    }

    Ok(())
}
