//! JSON dumps of prepared objects.
//!
//! Splits and embedding matrices are persisted this way between the
//! preprocessing run and the training process.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use textprep_core::{PrepError, Result};
use textprep_tokenizer::AtomicFile;

/// Serialize `value` as JSON to `path`, replacing any existing file.
pub fn dump_to_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut out = AtomicFile::create(path)?;
    serde_json::to_writer(out.writer(), value)?;
    out.commit()?;

    tracing::debug!("Dumped object to {}", path.display());
    Ok(())
}

/// Deserialize a JSON dump written by `dump_to_file`.
pub fn load_from_dump<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| PrepError::open(path, e))?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    Ok(value)
}
