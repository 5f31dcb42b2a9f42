//! Error types for the textprep library.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for the preprocessing pipeline.
#[derive(Error, Debug)]
pub enum PrepError {
    /// A required input file does not exist
    #[error("File not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// The vocabulary file does not exist
    #[error("Vocabulary file {} not found", .0.display())]
    VocabularyNotFound(PathBuf),

    /// I/O error with file context
    #[error("I/O error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A raw id sequence is longer than the fixed sentence length
    #[error("Line {line} of {} holds {len} ids, more than the fixed length {max}", path.display())]
    LengthViolation {
        path: PathBuf,
        line: usize,
        len: usize,
        max: usize,
    },

    /// A numeric field could not be parsed
    #[error("Parse error at line {line} of {}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A record does not have the width of the records before it
    #[error(
        "Shape mismatch at line {line} of {}: expected {expected} values, found {found}",
        path.display()
    )]
    ShapeMismatch {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Values that would not survive serialization
    #[error("{count} records hold non-finite {field} values")]
    NonFinite { field: &'static str, count: usize },

    /// Malformed pretrained embedding file
    #[error("Embedding format error: {0}")]
    Embedding(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PrepError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Map an open failure to `MissingFile` when the file is absent.
    pub fn open(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::MissingFile(path.as_ref().to_path_buf())
        } else {
            Self::io(path, source)
        }
    }

    /// Build a parse error for a 1-based line.
    pub fn parse(path: impl AsRef<Path>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for preprocessing operations.
pub type Result<T> = std::result::Result<T, PrepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_not_found_is_missing_file() {
        let err = PrepError::open(
            "corpus.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, PrepError::MissingFile(p) if p == PathBuf::from("corpus.txt")));
    }

    #[test]
    fn test_open_other_kind_is_io() {
        let err = PrepError::open(
            "corpus.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(matches!(err, PrepError::Io { .. }));
    }

    #[test]
    fn test_length_violation_message() {
        let err = PrepError::LengthViolation {
            path: PathBuf::from("ids.txt"),
            line: 3,
            len: 12,
            max: 10,
        };
        assert_eq!(
            err.to_string(),
            "Line 3 of ids.txt holds 12 ids, more than the fixed length 10"
        );
    }
}
