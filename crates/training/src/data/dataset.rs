//! Dataset loading from pre-tokenized numeric files.
//!
//! Three files are read in lock-step: token ids, label vectors and one raw
//! attention weight per line. The weights are normalized over the whole
//! dataset before the records are shuffled and split.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use textprep_core::{PrepError, Result, PAD_ID};
use textprep_tokenizer::open_text;

/// One training example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Token ids, right-padded to the sentence length
    pub ids: Vec<u32>,
    /// Label vector
    pub label: Vec<f32>,
    /// Normalized attention weight
    pub weight: f32,
}

/// Records divided into a training part and a held-out part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// Records for training
    pub train: Vec<Record>,
    /// Records held out for evaluation
    pub holdout: Vec<Record>,
}

impl Split {
    /// Total number of records in both parts.
    pub fn len(&self) -> usize {
        self.train.len() + self.holdout.len()
    }

    /// Check if both parts are empty.
    pub fn is_empty(&self) -> bool {
        self.train.is_empty() && self.holdout.is_empty()
    }

    /// Check that every weight and label is finite.
    ///
    /// Plain softmax overflows to NaN on large raw weights, and JSON has no
    /// encoding for NaN or infinity.
    pub fn ensure_finite(&self) -> Result<()> {
        let records = || self.train.iter().chain(&self.holdout);

        let count = records().filter(|r| !r.weight.is_finite()).count();
        if count > 0 {
            return Err(PrepError::NonFinite {
                field: "weight",
                count,
            });
        }

        let count = records()
            .filter(|r| r.label.iter().any(|v| !v.is_finite()))
            .count();
        if count > 0 {
            return Err(PrepError::NonFinite {
                field: "label",
                count,
            });
        }

        Ok(())
    }
}

/// How raw attention weights are turned into a distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// `exp(a_i) / sum(exp(a_j))` computed directly
    #[default]
    Softmax,
    /// Softmax with the maximum subtracted before exponentiation
    StableSoftmax,
}

impl Normalization {
    /// Normalize `weights` in place so that they sum to one.
    pub fn apply(&self, weights: &mut [f32]) {
        if weights.is_empty() {
            return;
        }

        let shift = match self {
            Normalization::Softmax => 0.0,
            Normalization::StableSoftmax => {
                weights.iter().copied().fold(f32::NEG_INFINITY, f32::max)
            }
        };

        for w in weights.iter_mut() {
            *w = (*w - shift).exp();
        }
        let sum: f32 = weights.iter().sum();
        if !sum.is_finite() || sum == 0.0 {
            tracing::warn!(
                "Attention weights sum to {} after exponentiation; consider stable softmax",
                sum
            );
        }
        for w in weights.iter_mut() {
            *w /= sum;
        }
    }
}

/// Configuration for loading a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Fixed sentence length in ids
    pub sent_len: usize,
    /// Number of records in the training part
    pub train_size: usize,
    /// Shuffle records before splitting
    pub shuffle: bool,
    /// Attention weight normalization
    pub normalization: Normalization,
}

impl DatasetConfig {
    /// Create a configuration for sentences of `sent_len` ids.
    pub fn new(sent_len: usize) -> Self {
        Self {
            sent_len,
            train_size: 10_000,
            shuffle: true,
            normalization: Normalization::default(),
        }
    }

    /// Set the number of training records.
    pub fn train_size(mut self, size: usize) -> Self {
        self.train_size = size;
        self
    }

    /// Set whether records are shuffled before splitting.
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set the attention weight normalization.
    pub fn normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }
}

/// Line reader that remembers its file and 1-based line number.
struct NumberedLines<R> {
    path: PathBuf,
    lines: io::Lines<R>,
    line: usize,
}

impl<R: BufRead> NumberedLines<R> {
    fn new(reader: R, path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            lines: reader.lines(),
            line: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        match self.lines.next() {
            None => Ok(None),
            Some(line) => {
                self.line += 1;
                line.map(Some).map_err(|e| PrepError::io(&self.path, e))
            }
        }
    }

    /// Count the lines not read yet.
    fn remaining(&mut self) -> Result<usize> {
        let mut count = 0;
        while self.next_line()?.is_some() {
            count += 1;
        }
        Ok(count)
    }

    fn parse_ids(&self, line: &str, sent_len: usize) -> Result<Vec<u32>> {
        let mut ids = line
            .split_whitespace()
            .map(|field| {
                field.parse::<u32>().map_err(|e| {
                    let message = format!("invalid id {:?}: {}", field, e);
                    PrepError::parse(&self.path, self.line, message)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if ids.len() > sent_len {
            return Err(PrepError::LengthViolation {
                path: self.path.clone(),
                line: self.line,
                len: ids.len(),
                max: sent_len,
            });
        }
        ids.resize(sent_len, PAD_ID);
        Ok(ids)
    }

    fn parse_label(&self, line: &str) -> Result<Vec<f32>> {
        line.split_whitespace()
            .map(|field| {
                field.parse::<f32>().map_err(|e| {
                    let message = format!("invalid label {:?}: {}", field, e);
                    PrepError::parse(&self.path, self.line, message)
                })
            })
            .collect()
    }

    fn parse_weight(&self, line: &str) -> Result<f32> {
        let field = line.trim();
        field.parse::<f32>().map_err(|e| {
            PrepError::parse(&self.path, self.line, format!("invalid weight {:?}: {}", field, e))
        })
    }
}

/// Read records from three line-aligned readers.
///
/// Weights are returned raw. Reading stops at the end of the shortest input.
fn collect_records<S, T, A>(
    source: &mut NumberedLines<S>,
    target: &mut NumberedLines<T>,
    attention: &mut NumberedLines<A>,
    sent_len: usize,
) -> Result<Vec<Record>>
where
    S: BufRead,
    T: BufRead,
    A: BufRead,
{
    let mut records = Vec::new();
    let mut width: Option<usize> = None;

    loop {
        let lines = (source.next_line()?, target.next_line()?, attention.next_line()?);
        let (src, tgt, att) = match lines {
            (Some(src), Some(tgt), Some(att)) => (src, tgt, att),
            (src, tgt, att) => {
                // Lines read in the final round count as ignored too
                let ignored = [
                    (source.path.clone(), source.remaining()? + usize::from(src.is_some())),
                    (target.path.clone(), target.remaining()? + usize::from(tgt.is_some())),
                    (attention.path.clone(), attention.remaining()? + usize::from(att.is_some())),
                ];
                for (path, count) in ignored {
                    if count > 0 {
                        tracing::warn!(
                            "Stopped after {} records; {} lines of {} were ignored",
                            records.len(),
                            count,
                            path.display()
                        );
                    }
                }
                break;
            }
        };

        let ids = source.parse_ids(&src, sent_len)?;
        let label = target.parse_label(&tgt)?;
        let weight = attention.parse_weight(&att)?;

        match width {
            None => width = Some(label.len()),
            Some(expected) if expected != label.len() => {
                return Err(PrepError::ShapeMismatch {
                    path: target.path.clone(),
                    line: target.line,
                    expected,
                    found: label.len(),
                });
            }
            Some(_) => {}
        }

        records.push(Record { ids, label, weight });
    }

    Ok(records)
}

/// Dataset loader - turns id, label and attention files into a split dataset.
pub struct DatasetReader {
    config: DatasetConfig,
}

impl DatasetReader {
    /// Create a new reader.
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Read the three files and return the split dataset.
    pub fn read<R: Rng + ?Sized>(
        &self,
        source_path: &Path,
        target_path: &Path,
        attention_path: &Path,
        rng: &mut R,
    ) -> Result<Split> {
        let mut source = NumberedLines::new(open_text(source_path)?, source_path);
        let mut target = NumberedLines::new(open_text(target_path)?, target_path);
        let mut attention = NumberedLines::new(open_text(attention_path)?, attention_path);

        tracing::info!("Loading data from {}", source_path.display());
        let records =
            collect_records(&mut source, &mut target, &mut attention, self.config.sent_len)?;
        Ok(self.finish(records, rng))
    }

    /// Read from in-memory readers. Paths are used for error context only.
    pub fn read_from<S, T, A, R>(
        &self,
        source: (S, &Path),
        target: (T, &Path),
        attention: (A, &Path),
        rng: &mut R,
    ) -> Result<Split>
    where
        S: BufRead,
        T: BufRead,
        A: BufRead,
        R: Rng + ?Sized,
    {
        let mut source = NumberedLines::new(source.0, source.1);
        let mut target = NumberedLines::new(target.0, target.1);
        let mut attention = NumberedLines::new(attention.0, attention.1);

        let records =
            collect_records(&mut source, &mut target, &mut attention, self.config.sent_len)?;
        Ok(self.finish(records, rng))
    }

    fn finish<R: Rng + ?Sized>(&self, mut records: Vec<Record>, rng: &mut R) -> Split {
        let mut weights: Vec<f32> = records.iter().map(|r| r.weight).collect();
        self.config.normalization.apply(&mut weights);
        for (record, weight) in records.iter_mut().zip(weights) {
            record.weight = weight;
        }

        tracing::info!("Shuffling and splitting {} records", records.len());
        if self.config.shuffle {
            records.shuffle(rng);
        }

        let holdout = records.split_off(self.config.train_size.min(records.len()));
        tracing::debug!(
            "Dataset split: {} training, {} holdout",
            records.len(),
            holdout.len()
        );

        Split {
            train: records,
            holdout,
        }
    }
}

/// Read a dataset from id, label and attention files.
pub fn read_data<R: Rng + ?Sized>(
    source_path: &Path,
    target_path: &Path,
    attention_path: &Path,
    config: &DatasetConfig,
    rng: &mut R,
) -> Result<Split> {
    DatasetReader::new(*config).read(source_path, target_path, attention_path, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn read(config: DatasetConfig, source: &str, target: &str, attention: &str) -> Result<Split> {
        let mut rng = StdRng::seed_from_u64(7);
        DatasetReader::new(config).read_from(
            (source.as_bytes(), Path::new("ids")),
            (target.as_bytes(), Path::new("labels")),
            (attention.as_bytes(), Path::new("attention")),
            &mut rng,
        )
    }

    #[test]
    fn test_padding_and_order_without_shuffle() {
        let config = DatasetConfig::new(4).shuffle(false);
        let split = read(config, "5 6\n7 8 9 10\n", "1 0\n0 1\n", "0.0\n0.0\n").unwrap();

        assert_eq!(split.train.len(), 2);
        assert!(split.holdout.is_empty());
        assert_eq!(split.train[0].ids, vec![5, 6, PAD_ID, PAD_ID]);
        assert_eq!(split.train[1].ids, vec![7, 8, 9, 10]);
        assert_eq!(split.train[0].label, vec![1.0, 0.0]);
    }

    #[test]
    fn test_empty_source_line_is_all_padding() {
        let split = read(DatasetConfig::new(3).shuffle(false), "\n", "1\n", "0\n").unwrap();
        assert_eq!(split.train[0].ids, vec![PAD_ID; 3]);
    }

    #[test]
    fn test_weights_are_softmaxed() {
        let config = DatasetConfig::new(2).shuffle(false);
        let split = read(config, "1\n2\n", "1\n1\n", "0.0\n0.0\n").unwrap();
        assert!((split.train[0].weight - 0.5).abs() < 1e-6);
        assert!((split.train[1].weight - 0.5).abs() < 1e-6);

        let split = read(config, "1\n2\n3\n", "1\n1\n1\n", "1.0\n2.0\n3.0\n").unwrap();
        let sum: f32 = split.train.iter().map(|r| r.weight).sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(split.train[0].weight < split.train[1].weight);
        assert!(split.train[1].weight < split.train[2].weight);
    }

    #[test]
    fn test_stable_softmax_handles_large_weights() {
        let mut weights = vec![1000.0, 1000.0];
        Normalization::StableSoftmax.apply(&mut weights);
        assert_eq!(weights, vec![0.5, 0.5]);

        let mut weights = vec![1.0, 2.0, 3.0];
        let mut plain = weights.clone();
        Normalization::StableSoftmax.apply(&mut weights);
        Normalization::Softmax.apply(&mut plain);
        for (a, b) in weights.iter().zip(&plain) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_overflowing_weights_are_not_finite() {
        let config = DatasetConfig::new(1).shuffle(false);
        let split = read(config, "1\n2\n", "0\n0\n", "100\n100\n").unwrap();
        assert!(split.train.iter().all(|r| r.weight.is_nan()));
        assert!(matches!(
            split.ensure_finite(),
            Err(PrepError::NonFinite { field: "weight", count: 2 })
        ));

        let config = config.normalization(Normalization::StableSoftmax);
        let split = read(config, "1\n2\n", "0\n0\n", "100\n100\n").unwrap();
        assert!(split.ensure_finite().is_ok());
        assert_eq!(split.train[0].weight, 0.5);
    }

    #[test]
    fn test_infinite_label_is_not_finite() {
        let split = read(DatasetConfig::new(1), "1\n", "inf\n", "0\n").unwrap();
        assert!(matches!(
            split.ensure_finite(),
            Err(PrepError::NonFinite { field: "label", count: 1 })
        ));
    }

    #[test]
    fn test_split_sizes() {
        let source = "1\n2\n3\n4\n5\n";
        let target = "0\n1\n2\n3\n4\n";
        let attention = "0\n0\n0\n0\n0\n";

        let split = read(DatasetConfig::new(1).train_size(3), source, target, attention).unwrap();
        assert_eq!(split.train.len(), 3);
        assert_eq!(split.holdout.len(), 2);

        let split = read(DatasetConfig::new(1).train_size(50), source, target, attention).unwrap();
        assert_eq!(split.train.len(), 5);
        assert!(split.holdout.is_empty());
    }

    #[test]
    fn test_shuffle_keeps_every_record_once() {
        let source: String = (1..=20).map(|i| format!("{}\n", i)).collect();
        let target: String = (1..=20).map(|i| format!("{}\n", i)).collect();
        let attention = "0\n".repeat(20);

        let config = DatasetConfig::new(1).train_size(12);
        let split = read(config, &source, &target, &attention).unwrap();
        let mut seen: Vec<u32> = split
            .train
            .iter()
            .chain(&split.holdout)
            .map(|r| {
                // ids and labels stay aligned through the permutation
                assert_eq!(r.ids[0] as f32, r.label[0]);
                r.ids[0]
            })
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (1..=20).collect::<Vec<u32>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let source: String = (1..=10).map(|i| format!("{}\n", i)).collect();
        let attention = "0\n".repeat(10);
        let a = read(DatasetConfig::new(1).train_size(5), &source, &source, &attention).unwrap();
        let b = read(DatasetConfig::new(1).train_size(5), &source, &source, &attention).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_length_violation() {
        let err = read(DatasetConfig::new(2), "1 2\n1 2 3\n", "0\n0\n", "0\n0\n").unwrap_err();
        assert!(matches!(
            err,
            PrepError::LengthViolation { line: 2, len: 3, max: 2, .. }
        ));
    }

    #[test]
    fn test_shape_mismatch() {
        let target = "0 1\n1 0\n1\n";
        let err = read(DatasetConfig::new(2), "1\n2\n3\n", target, "0\n0\n0\n").unwrap_err();
        assert!(matches!(
            err,
            PrepError::ShapeMismatch { line: 3, expected: 2, found: 1, .. }
        ));
    }

    #[test]
    fn test_parse_errors_name_file_and_line() {
        let err = read(DatasetConfig::new(2), "1\nx\n", "0\n0\n", "0\n0\n").unwrap_err();
        assert!(matches!(
            err,
            PrepError::Parse { ref path, line: 2, .. } if path == Path::new("ids")
        ));

        let err = read(DatasetConfig::new(2), "1\n", "0\n", "abc\n").unwrap_err();
        assert!(matches!(
            err,
            PrepError::Parse { ref path, line: 1, .. } if path == Path::new("attention")
        ));
    }

    #[test]
    fn test_lock_step_stops_at_shortest_file() {
        let config = DatasetConfig::new(1).shuffle(false);
        let split = read(config, "1\n2\n3\n", "0\n0\n", "0\n0\n0\n").unwrap();
        assert_eq!(split.len(), 2);
    }

    #[test]
    fn test_empty_files() {
        let split = read(DatasetConfig::new(3), "", "", "").unwrap();
        assert!(split.is_empty());
    }

    #[test]
    fn test_read_data_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("ids.txt");
        let target = dir.path().join("labels.txt");
        let attention = dir.path().join("att.txt");
        std::fs::write(&source, "3 4\n5\n").unwrap();
        std::fs::write(&target, "1 0\n0 1\n").unwrap();
        std::fs::write(&attention, "0.5\n0.5\n").unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        let config = DatasetConfig::new(3).train_size(1);
        let split = read_data(&source, &target, &attention, &config, &mut rng).unwrap();
        assert_eq!(split.train.len(), 1);
        assert_eq!(split.holdout.len(), 1);
        assert!(split.train.iter().chain(&split.holdout).all(|r| r.ids.len() == 3));

        let err = read_data(&dir.path().join("none"), &target, &attention, &config, &mut rng)
            .unwrap_err();
        assert!(matches!(err, PrepError::MissingFile(_)));
    }
}
