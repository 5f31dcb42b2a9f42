//! Mini-batch generation over in-memory records.

use super::dataset::Record;
use rand::seq::SliceRandom;
use rand::Rng;
use textprep_core::{PrepError, Result};

/// Finite iterator over mini-batches for a number of epochs.
///
/// Each epoch is sliced into `ceil(len / batch_size)` contiguous batches; the
/// last one may be short. Batches never span two epochs. With shuffling
/// enabled the data is permuted at the start of every epoch.
pub struct BatchIter<T, R> {
    data: Vec<T>,
    batch_size: usize,
    num_epochs: usize,
    shuffle: bool,
    rng: R,
    /// Current epoch
    epoch: usize,
    /// Next batch within the current epoch
    batch: usize,
}

impl<T: Clone, R: Rng> BatchIter<T, R> {
    /// Create a batch iterator.
    ///
    /// `rng` may be an owned generator or `&mut` to one.
    pub fn new(
        data: Vec<T>,
        batch_size: usize,
        num_epochs: usize,
        shuffle: bool,
        rng: R,
    ) -> Result<Self> {
        if batch_size == 0 {
            return Err(PrepError::InvalidConfig("batch size must be at least 1".into()));
        }

        Ok(Self {
            data,
            batch_size,
            num_epochs,
            shuffle,
            rng,
            epoch: 0,
            batch: 0,
        })
    }

    /// Number of batches in one epoch.
    pub fn batches_per_epoch(&self) -> usize {
        self.data.len().div_ceil(self.batch_size)
    }

    /// Number of batches not yet yielded.
    pub fn remaining(&self) -> usize {
        let per_epoch = self.batches_per_epoch();
        self.num_epochs
            .saturating_sub(self.epoch)
            .saturating_mul(per_epoch)
            .saturating_sub(self.batch)
    }
}

impl<T: Clone, R: Rng> Iterator for BatchIter<T, R> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let per_epoch = self.batches_per_epoch();
        if per_epoch == 0 || self.epoch >= self.num_epochs {
            return None;
        }

        if self.batch == 0 && self.shuffle {
            self.data.shuffle(&mut self.rng);
        }

        let start = self.batch * self.batch_size;
        let end = (start + self.batch_size).min(self.data.len());
        let batch = self.data[start..end].to_vec();

        self.batch += 1;
        if self.batch == per_epoch {
            self.batch = 0;
            self.epoch += 1;
        }

        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<T: Clone, R: Rng> ExactSizeIterator for BatchIter<T, R> {}

/// Create a batch iterator.
pub fn batch_iter<T: Clone, R: Rng>(
    data: Vec<T>,
    batch_size: usize,
    num_epochs: usize,
    shuffle: bool,
    rng: R,
) -> Result<BatchIter<T, R>> {
    BatchIter::new(data, batch_size, num_epochs, shuffle, rng)
}

/// Records collated into columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    /// Token id rows
    pub ids: Vec<Vec<u32>>,
    /// Label rows
    pub labels: Vec<Vec<f32>>,
    /// Attention weights
    pub weights: Vec<f32>,
}

impl Batch {
    /// Number of records in the batch.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Check if the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl FromIterator<Record> for Batch {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut batch = Batch::default();
        for record in iter {
            batch.ids.push(record.ids);
            batch.labels.push(record.label);
            batch.weights.push(record.weight);
        }
        batch
    }
}

impl From<Vec<Record>> for Batch {
    fn from(records: Vec<Record>) -> Self {
        records.into_iter().collect()
    }
}
