//! Save functionality for vocabularies and derived files.
//!
//! Every output is written to a hidden sibling file and renamed into place on
//! commit, so an interrupted write never leaves a partial target behind.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use textprep_core::{PrepError, Result, Vocabulary};

/// Outcome of an idempotent file-producing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// The file was written
    Created,
    /// The file already existed and was left untouched
    Skipped,
}

/// A file that only appears at its target path once committed.
pub struct AtomicFile {
    /// Final location
    target: PathBuf,
    /// Temporary location next to the target
    tmp: PathBuf,
    /// Open writer, `None` once commit has started
    writer: Option<BufWriter<File>>,
    /// Set only after the rename succeeded
    committed: bool,
}

impl AtomicFile {
    /// Start writing a file that will land at `target`.
    pub fn create(target: &Path) -> Result<Self> {
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PrepError::io(parent, e))?;
        }

        let file_name = target
            .file_name()
            .ok_or_else(|| {
                PrepError::InvalidConfig(format!("{} is not a file path", target.display()))
            })?
            .to_string_lossy();
        let tmp = target.with_file_name(format!(".{}.tmp", file_name));

        let file = File::create(&tmp).map_err(|e| PrepError::io(&tmp, e))?;
        Ok(Self {
            target: target.to_path_buf(),
            tmp,
            writer: Some(BufWriter::new(file)),
            committed: false,
        })
    }

    /// The buffered writer for the file contents.
    pub fn writer(&mut self) -> &mut BufWriter<File> {
        self.writer
            .as_mut()
            .expect("AtomicFile writer used after commit")
    }

    /// Flush the contents and move the file to its target path.
    pub fn commit(mut self) -> Result<()> {
        if let Some(writer) = self.writer.take() {
            let file = writer
                .into_inner()
                .map_err(|e| PrepError::io(&self.tmp, e.into_error()))?;
            file.sync_all().map_err(|e| PrepError::io(&self.tmp, e))?;
        }
        fs::rename(&self.tmp, &self.target).map_err(|e| PrepError::io(&self.target, e))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for AtomicFile {
    fn drop(&mut self) {
        if !self.committed {
            drop(self.writer.take());
            let _ = fs::remove_file(&self.tmp);
        }
    }
}

/// Vocabulary saver - writes one token per line in id order.
pub struct VocabularySaver<'a> {
    /// Vocabulary reference
    vocab: &'a Vocabulary,
}

impl<'a> VocabularySaver<'a> {
    /// Create a new vocabulary saver.
    pub fn new(vocab: &'a Vocabulary) -> Self {
        Self { vocab }
    }

    /// Save the vocabulary to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut out = AtomicFile::create(path)?;
        self.write_to(out.writer())
            .map_err(|e| PrepError::io(path, e))?;
        out.commit()
    }

    /// Write the vocabulary to any writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for token in self.vocab.iter() {
            writeln!(writer, "{}", token)?;
        }
        Ok(())
    }
}

/// Save a vocabulary file.
pub fn save_vocabulary(vocab: &Vocabulary, path: &Path) -> Result<()> {
    VocabularySaver::new(vocab).save(path)
}
