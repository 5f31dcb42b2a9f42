//! Pretrained word embeddings from word2vec binary files.
//!
//! The binary layout is a text header `"<count> <dim>\n"` followed by
//! `count` entries, each a word terminated by a space and `dim`
//! little-endian `f32` values. Newlines between entries are skipped.

use ahash::AHashMap;
use byteorder::{LittleEndian, ReadBytesExt};
use compact_str::CompactString;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use textprep_core::{PrepError, Result, Vocabulary};

/// Half-width of the uniform range used for words without a vector.
pub const RANDOM_INIT_RANGE: f32 = 0.25;

/// Vectors of the vocabulary words found in a word2vec file.
#[derive(Debug, Clone, Default)]
pub struct WordVectors {
    /// Word -> vector of length `dim`
    pub vectors: AHashMap<CompactString, Vec<f32>>,
    /// Vector dimension from the file header
    pub dim: usize,
}

/// Dense embedding matrix, one row per vocabulary id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingMatrix {
    rows: usize,
    dim: usize,
    /// Row-major values
    data: Vec<f32>,
}

impl EmbeddingMatrix {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Row width.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The `(rows, dim)` shape.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.dim)
    }

    /// Get the row for a token id.
    pub fn row(&self, id: u32) -> Option<&[f32]> {
        let start = (id as usize).checked_mul(self.dim)?;
        self.data.get(start..start.checked_add(self.dim)?)
    }

    /// All values in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

fn truncated(entry: usize) -> impl FnOnce(io::Error) -> PrepError {
    move |e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            PrepError::Embedding(format!("file ends inside entry {}", entry))
        } else {
            PrepError::Embedding(e.to_string())
        }
    }
}

/// Size in bytes of `values` f32s, if it fits in memory at all.
fn f32_bytes(values: usize) -> Option<usize> {
    values
        .checked_mul(std::mem::size_of::<f32>())
        .filter(|&bytes| bytes <= isize::MAX as usize)
}

/// Read word2vec vectors for the words of `vocab` from any reader.
///
/// Entries whose word is not valid UTF-8 cannot match the vocabulary and
/// are skipped like any other unknown word.
pub fn read_word2vec<R: BufRead>(mut reader: R, vocab: &Vocabulary) -> Result<WordVectors> {
    let mut header = String::new();
    reader
        .read_line(&mut header)
        .map_err(|e| PrepError::Embedding(e.to_string()))?;

    let invalid_header =
        || PrepError::Embedding(format!("invalid header {:?}", header.trim_end()));
    let mut fields = header.split_whitespace().map(str::parse::<usize>);
    let (count, dim) = match (fields.next(), fields.next()) {
        (Some(Ok(count)), Some(Ok(dim))) => (count, dim),
        _ => return Err(invalid_header()),
    };
    let row_bytes = f32_bytes(dim).ok_or_else(invalid_header)?;

    let mut vectors = AHashMap::new();
    let mut word = Vec::new();
    for entry in 0..count {
        word.clear();
        loop {
            match reader.read_u8().map_err(truncated(entry))? {
                b' ' => break,
                b'\n' => {}
                byte => word.push(byte),
            }
        }

        let known = std::str::from_utf8(&word)
            .ok()
            .filter(|word| vocab.contains(word));
        match known {
            Some(word) => {
                // Grown while reading, so a lying header hits EOF before a huge allocation
                let vector = (0..dim)
                    .map(|_| reader.read_f32::<LittleEndian>())
                    .collect::<io::Result<Vec<f32>>>()
                    .map_err(truncated(entry))?;
                vectors.insert(CompactString::new(word), vector);
            }
            None => {
                let mut vector = (&mut reader).take(row_bytes as u64);
                let skipped = io::copy(&mut vector, &mut io::sink()).map_err(truncated(entry))?;
                if skipped < row_bytes as u64 {
                    return Err(PrepError::Embedding(format!(
                        "file ends inside entry {}",
                        entry
                    )));
                }
            }
        }
    }

    Ok(WordVectors { vectors, dim })
}

/// Load word2vec vectors for the words of `vocab` from a binary file.
pub fn load_word2vec(path: &Path, vocab: &Vocabulary) -> Result<WordVectors> {
    let file = File::open(path).map_err(|e| PrepError::open(path, e))?;
    read_word2vec(BufReader::new(file), vocab)
}

/// Build an embedding matrix for `vocab` from a word2vec binary file.
///
/// Words without a pretrained vector get values drawn uniformly from
/// `[-0.25, 0.25)`.
pub fn prepare_pretrained_embedding<R: Rng + ?Sized>(
    path: &Path,
    vocab: &Vocabulary,
    rng: &mut R,
) -> Result<EmbeddingMatrix> {
    tracing::info!("Reading pretrained word vectors from {}", path.display());
    let vectors = load_word2vec(path, vocab)?;
    let matrix = build_matrix(&vectors, vocab, rng)?;
    tracing::info!(
        "Generated embeddings with shape {:?} ({} pretrained rows)",
        matrix.shape(),
        vectors.vectors.len()
    );
    Ok(matrix)
}

/// Arrange vectors by vocabulary id, filling gaps randomly.
pub fn build_matrix<R: Rng + ?Sized>(
    vectors: &WordVectors,
    vocab: &Vocabulary,
    rng: &mut R,
) -> Result<EmbeddingMatrix> {
    let dim = vectors.dim;
    let size = vocab
        .len()
        .checked_mul(dim)
        .filter(|&size| f32_bytes(size).is_some())
        .ok_or_else(|| {
            PrepError::Embedding(format!(
                "a {}x{} embedding matrix does not fit in memory",
                vocab.len(),
                dim
            ))
        })?;

    let mut data = Vec::with_capacity(size);
    for token in vocab.iter() {
        match vectors.vectors.get(token) {
            Some(vector) => data.extend_from_slice(vector),
            None => data.extend(
                (0..dim).map(|_| rng.gen_range(-RANDOM_INIT_RANGE..RANDOM_INIT_RANGE)),
            ),
        }
    }

    Ok(EmbeddingMatrix {
        rows: vocab.len(),
        dim,
        data,
    })
}
