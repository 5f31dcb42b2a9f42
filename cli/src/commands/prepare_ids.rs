//! Prepare-ids command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Prepare-ids command arguments.
#[derive(Parser)]
pub struct PrepareIdsCommand {
    /// Directory holding clean.left, clean.middle, clean.right and clean.txt
    #[arg(short, long)]
    pub data_dir: PathBuf,

    /// Path to the vocabulary file
    #[arg(short, long)]
    pub vocab: PathBuf,
}

use anyhow::Result as AnyhowResult;
use textprep_tokenizer::prepare_ids;

pub fn run(cmd: PrepareIdsCommand) -> AnyhowResult<()> {
    prepare_ids(&cmd.data_dir, &cmd.vocab)?;
    println!("Id files ready in {}", cmd.data_dir.display());
    Ok(())
}
