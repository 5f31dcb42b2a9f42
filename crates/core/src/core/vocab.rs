//! Vocabulary storage and lookup.
//!
//! A vocabulary is an ordered token list (the reverse form, id order) plus
//! its inverse map (the forward form). Tokens are stored as `CompactString`
//! since nearly all of them fit inline.

use ahash::AHashMap;
use compact_str::CompactString;

/// Padding symbol, always id 0.
pub const PAD_TOKEN: &str = "<pad>";
/// Unknown-word symbol, always id 1.
pub const UNK_TOKEN: &str = "<unk>";
/// Begin-of-sentence marker.
pub const BOS_TOKEN: &str = "<bos>";
/// End-of-sentence marker.
pub const EOS_TOKEN: &str = "<eos>";
/// Placeholder every digit-only token is rewritten to.
pub const NUM_TOKEN: &str = "<num>";

/// Id of [`PAD_TOKEN`].
pub const PAD_ID: u32 = 0;
/// Id of [`UNK_TOKEN`].
pub const UNK_ID: u32 = 1;

/// Symbols placed at the start of every built vocabulary, in id order.
pub const START_VOCAB: [&str; 2] = [PAD_TOKEN, UNK_TOKEN];

/// Forward mapping: token string -> ID
pub type Vocab = AHashMap<CompactString, u32>;

/// Frequency-ranked symbol table.
///
/// Built once, then shared read-only by every mapping operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    /// Forward mapping: token string -> ID
    forward: Vocab,
    /// Reverse mapping: ID -> token string, in id order
    reverse: Vec<CompactString>,
}

impl Vocabulary {
    /// Build a vocabulary from tokens in id order.
    ///
    /// When a token appears twice the forward map keeps the later id, the
    /// same as reading a vocabulary file line by line.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let reverse: Vec<CompactString> = tokens
            .into_iter()
            .map(|t| CompactString::new(t.as_ref()))
            .collect();

        let mut forward = Vocab::with_capacity(reverse.len());
        for (id, token) in reverse.iter().enumerate() {
            forward.insert(token.clone(), id as u32);
        }

        Self { forward, reverse }
    }

    /// Get the ID for a token string.
    #[inline]
    pub fn get_id(&self, token: &str) -> Option<u32> {
        self.forward.get(token).copied()
    }

    /// Get the ID for a token, falling back to [`UNK_ID`].
    #[inline]
    pub fn id_or_unk(&self, token: &str) -> u32 {
        self.get_id(token).unwrap_or(UNK_ID)
    }

    /// Get the token string for an ID.
    #[inline]
    pub fn get_token(&self, id: u32) -> Option<&str> {
        self.reverse.get(id as usize).map(|s| s.as_str())
    }

    /// Check whether a token has an id.
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.forward.contains_key(token)
    }

    /// Number of entries in the reverse list.
    #[inline]
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    /// The forward mapping.
    pub fn forward(&self) -> &Vocab {
        &self.forward
    }

    /// The reverse list, in id order.
    pub fn reverse(&self) -> &[CompactString] {
        &self.reverse
    }

    /// Iterate over tokens in id order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.reverse.iter().map(|s| s.as_str())
    }
}
