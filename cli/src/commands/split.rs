//! Split command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Split command arguments.
#[derive(Parser)]
pub struct SplitCommand {
    /// Token id file, one sentence per line
    #[arg(short = 'i', long)]
    pub source: PathBuf,

    /// Label file, one vector per line
    #[arg(short, long)]
    pub target: PathBuf,

    /// Attention weight file, one value per line
    #[arg(short, long)]
    pub attention: PathBuf,

    /// Output file for the JSON train/holdout split
    #[arg(short, long)]
    pub output: PathBuf,

    /// Fixed sentence length in ids
    #[arg(short = 'l', long)]
    pub sent_len: usize,

    /// Number of training records
    #[arg(short = 'n', long, default_value_t = 10_000)]
    pub train_size: usize,

    /// Keep file order instead of shuffling
    #[arg(long, default_value_t = false)]
    pub no_shuffle: bool,

    /// Subtract the maximum weight before the softmax
    #[arg(long, default_value_t = false)]
    pub stable_softmax: bool,

    /// Seed for the shuffle
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl From<&SplitCommand> for DatasetConfig {
    fn from(cmd: &SplitCommand) -> Self {
        let normalization = if cmd.stable_softmax {
            Normalization::StableSoftmax
        } else {
            Normalization::Softmax
        };
        DatasetConfig::new(cmd.sent_len)
            .train_size(cmd.train_size)
            .shuffle(!cmd.no_shuffle)
            .normalization(normalization)
    }
}

use super::rng_from_seed;
use anyhow::{Context, Result as AnyhowResult};
use textprep_training::{dump_to_file, read_data, DatasetConfig, Normalization};

pub fn run(cmd: SplitCommand) -> AnyhowResult<()> {
    let config = DatasetConfig::from(&cmd);
    let mut rng = rng_from_seed(cmd.seed);

    let split = read_data(&cmd.source, &cmd.target, &cmd.attention, &config, &mut rng)?;
    split.ensure_finite().context(
        "Split not written; large attention weights overflow the plain softmax, \
         rerun with --stable-softmax",
    )?;
    dump_to_file(&cmd.output, &split)?;

    println!(
        "{} training and {} holdout records written to {}",
        split.train.len(),
        split.holdout.len(),
        cmd.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use textprep_training::{load_from_dump, Split};

    fn command(dir: &std::path::Path, stable_softmax: bool) -> SplitCommand {
        std::fs::write(dir.join("ids"), "1\n2\n").unwrap();
        std::fs::write(dir.join("labels"), "0\n1\n").unwrap();
        std::fs::write(dir.join("attention"), "100\n100\n").unwrap();
        SplitCommand {
            source: dir.join("ids"),
            target: dir.join("labels"),
            attention: dir.join("attention"),
            output: dir.join("split.json"),
            sent_len: 2,
            train_size: 1,
            no_shuffle: false,
            stable_softmax,
            seed: Some(5),
        }
    }

    #[test]
    fn test_overflowing_weights_are_not_dumped() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(command(dir.path(), false)).unwrap_err();
        assert!(format!("{:#}", err).contains("--stable-softmax"));
        assert!(!dir.path().join("split.json").exists());
    }

    #[test]
    fn test_stable_softmax_dump_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        run(command(dir.path(), true)).unwrap();

        let split: Split = load_from_dump(&dir.path().join("split.json")).unwrap();
        assert_eq!(split.train.len(), 1);
        assert_eq!(split.holdout.len(), 1);
        assert_eq!(split.train[0].weight, 0.5);
    }
}
