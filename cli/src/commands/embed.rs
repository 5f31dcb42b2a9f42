//! Embed command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Embed command arguments.
#[derive(Parser)]
pub struct EmbedCommand {
    /// Path to the word2vec binary file
    #[arg(short = 'w', long)]
    pub vectors: PathBuf,

    /// Path to the vocabulary file
    #[arg(short, long)]
    pub vocab: PathBuf,

    /// Output file for the JSON embedding matrix
    #[arg(short, long)]
    pub output: PathBuf,

    /// Seed for the random rows of words without a vector
    #[arg(short, long)]
    pub seed: Option<u64>,
}

use super::rng_from_seed;
use anyhow::Result as AnyhowResult;
use textprep_tokenizer::load_vocabulary;
use textprep_training::{dump_to_file, prepare_pretrained_embedding};

pub fn run(cmd: EmbedCommand) -> AnyhowResult<()> {
    let vocab = load_vocabulary(&cmd.vocab)?;
    let mut rng = rng_from_seed(cmd.seed);

    let matrix = prepare_pretrained_embedding(&cmd.vectors, &vocab, &mut rng)?;
    dump_to_file(&cmd.output, &matrix)?;

    let (rows, dim) = matrix.shape();
    println!("Embedding matrix {}x{} written to {}", rows, dim, cmd.output.display());
    Ok(())
}
