//! Run command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Run command arguments.
#[derive(Parser)]
pub struct RunCommand {
    /// JSON pipeline configuration; built-in defaults when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

use crate::config::PipelineConfig;
use anyhow::Result as AnyhowResult;

pub fn run(cmd: RunCommand) -> AnyhowResult<()> {
    let config = match &cmd.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    config.run()?;
    println!("Token ids ready in {}", config.ids_path.display());
    Ok(())
}
