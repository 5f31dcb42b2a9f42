//! In-memory datasets and mini-batches.

pub mod batch;
pub mod dataset;

pub use batch::{batch_iter, Batch, BatchIter};
pub use dataset::{read_data, DatasetConfig, DatasetReader, Normalization, Record, Split};
