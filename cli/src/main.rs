//! textprep CLI - Command-line interface for the preprocessing pipeline.
//!
//! This is the main entry point for the `textprep` command-line tool.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use commands::{
    EmbedCommand, EncodeCommand, PrepareIdsCommand, RunCommand, SplitCommand, VocabCommand,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "textprep")]
#[command(about = "Text preprocessing for machine-learning pipelines", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a vocabulary from a corpus
    Vocab(VocabCommand),
    /// Map a text file to token ids
    Encode(EncodeCommand),
    /// Map the left/middle/right/txt context files to token ids
    PrepareIds(PrepareIdsCommand),
    /// Build an embedding matrix from word2vec vectors
    Embed(EmbedCommand),
    /// Load a numeric dataset and split it into train and holdout
    Split(SplitCommand),
    /// Run the vocabulary and id steps from a pipeline config
    Run(RunCommand),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("textprep=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Vocab(cmd) => commands::vocab::run(cmd)?,
        Commands::Encode(cmd) => commands::encode::run(cmd)?,
        Commands::PrepareIds(cmd) => commands::prepare_ids::run(cmd)?,
        Commands::Embed(cmd) => commands::embed::run(cmd)?,
        Commands::Split(cmd) => commands::split::run(cmd)?,
        Commands::Run(cmd) => commands::run::run(cmd)?,
    }

    Ok(())
}
