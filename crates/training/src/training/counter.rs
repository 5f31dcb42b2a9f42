//! Token frequency counting for vocabulary building.
//!
//! Counts are kept in first-encounter order so that ranking by frequency can
//! break ties deterministically.

use ahash::AHashMap;
use compact_str::CompactString;

/// Insertion-ordered token frequency counter.
pub struct TokenCounter {
    /// Token -> position in `tokens`
    index: AHashMap<CompactString, usize>,
    /// Tokens in first-encounter order
    tokens: Vec<CompactString>,
    /// Count for each entry of `tokens`
    counts: Vec<u64>,
}

impl TokenCounter {
    /// Create a new token counter.
    pub fn new() -> Self {
        Self {
            index: AHashMap::new(),
            tokens: Vec::new(),
            counts: Vec::new(),
        }
    }

    /// Count one occurrence of a token.
    pub fn add_token(&mut self, token: &str) {
        if let Some(&pos) = self.index.get(token) {
            self.counts[pos] += 1;
        } else {
            let token = CompactString::new(token);
            self.index.insert(token.clone(), self.tokens.len());
            self.tokens.push(token);
            self.counts.push(1);
        }
    }

    /// Count every token of a sequence.
    pub fn add_tokens<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
    }

    /// Get the count of a token.
    pub fn get(&self, token: &str) -> u64 {
        self.index.get(token).map_or(0, |&pos| self.counts[pos])
    }

    /// Get the number of distinct tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get the total count of all token occurrences.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Tokens ranked by descending count.
    ///
    /// The sort is stable, so equal counts keep first-encounter order.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .tokens
            .iter()
            .map(|t| t.as_str())
            .zip(self.counts.iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Clear all data from the counter.
    pub fn clear(&mut self) {
        self.index.clear();
        self.tokens.clear();
        self.counts.clear();
    }
}

impl Default for TokenCounter {
    fn default() -> Self {
        Self::new()
    }
}
