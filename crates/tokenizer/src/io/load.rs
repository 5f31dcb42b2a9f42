//! Load functionality for vocabulary files.
//!
//! A vocabulary file holds one token per line; the line number (from 0) is
//! the token id.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use textprep_core::{PrepError, Result, Vocabulary};

/// Open a UTF-8 text file for buffered reading.
///
/// A missing file is reported as `PrepError::MissingFile`.
pub fn open_text(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| PrepError::open(path, e))?;
    Ok(BufReader::new(file))
}

/// Vocabulary loader - rebuilds the symbol table from disk.
pub struct VocabularyLoader;

impl VocabularyLoader {
    /// Load a vocabulary from a file.
    ///
    /// # Arguments
    /// * `path` - Vocabulary file written by `VocabularySaver`
    pub fn load(path: &Path) -> Result<Vocabulary> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PrepError::VocabularyNotFound(path.to_path_buf())
            } else {
                PrepError::io(path, e)
            }
        })?;

        let vocab = Self::from_reader(BufReader::new(file), path)?;
        tracing::debug!("Loaded {} tokens from {}", vocab.len(), path.display());
        Ok(vocab)
    }

    /// Read a vocabulary from any buffered reader.
    ///
    /// Each line is trimmed of surrounding whitespace. `path` is used for
    /// error context only.
    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> Result<Vocabulary> {
        let tokens = reader
            .lines()
            .map(|line| line.map(|l| l.trim().to_string()))
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| PrepError::io(path, e))?;

        Ok(Vocabulary::from_tokens(tokens))
    }
}

/// Load a vocabulary file.
pub fn load_vocabulary(path: &Path) -> Result<Vocabulary> {
    VocabularyLoader::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use textprep_core::{PAD_ID, UNK_ID};

    #[test]
    fn test_load_vocabulary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.txt");
        std::fs::write(&path, "<pad>\n<unk>\nthe \n cat\n").unwrap();

        let vocab = load_vocabulary(&path).unwrap();
        assert_eq!(vocab.len(), 4);
        assert_eq!(vocab.get_id("<pad>"), Some(PAD_ID));
        assert_eq!(vocab.get_id("<unk>"), Some(UNK_ID));
        assert_eq!(vocab.get_id("the"), Some(2));
        assert_eq!(vocab.get_id("cat"), Some(3));
        assert_eq!(vocab.get_token(3), Some("cat"));
    }

    #[test]
    fn test_missing_vocabulary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        let err = load_vocabulary(&path).unwrap_err();
        assert!(matches!(err, PrepError::VocabularyNotFound(p) if p == path));
    }

    #[test]
    fn test_from_reader() {
        let data = "<pad>\r\n<unk>\r\nword\r\n";
        let vocab = VocabularyLoader::from_reader(data.as_bytes(), Path::new("mem")).unwrap();
        assert_eq!(vocab.get_id("word"), Some(2));
    }

    #[test]
    fn test_open_text_missing_file() {
        let err = open_text(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, PrepError::MissingFile(_)));
    }
}
