//! Sentence boundary marking for pre-tokenization.
//!
//! Raw corpus lines separate sentences with a double space. This module turns
//! those separators into explicit `<eos> <bos>` markers and optionally wraps
//! the whole line in boundary markers before it is split into words.

use regex::{NoExpand, Regex};
use std::sync::OnceLock;
use textprep_core::{BOS_TOKEN, EOS_TOKEN};

/// Two consecutive ASCII whitespace characters.
fn sentence_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t\n\r\x0B\x0C]{2}").expect("Invalid regex pattern"))
}

/// Inserts sentence boundary markers into raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryMarker {
    /// Prepend `<bos>` to the line
    bos: bool,
    /// Append `<eos>` to the line
    eos: bool,
}

impl BoundaryMarker {
    /// Create a new marker.
    pub fn new(bos: bool, eos: bool) -> Self {
        Self { bos, eos }
    }

    /// Whether `<bos>` is prepended.
    pub fn bos(&self) -> bool {
        self.bos
    }

    /// Whether `<eos>` is appended.
    pub fn eos(&self) -> bool {
        self.eos
    }

    /// Mark sentence boundaries in `text`.
    ///
    /// Each non-overlapping run of two whitespace characters becomes
    /// ` <eos> <bos> `. Case and remaining whitespace are left untouched.
    pub fn mark(&self, text: &str) -> String {
        let separator = format!(" {} {} ", EOS_TOKEN, BOS_TOKEN);
        let mut marked = sentence_separator()
            .replace_all(text, NoExpand(&separator))
            .into_owned();

        if self.bos {
            marked = format!("{} {}", BOS_TOKEN, marked.trim());
        }
        if self.eos {
            marked = format!("{} {}", marked.trim(), EOS_TOKEN);
        }
        marked
    }
}

impl Default for BoundaryMarker {
    fn default() -> Self {
        Self::new(true, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_space_becomes_boundary() {
        let marker = BoundaryMarker::new(false, false);
        assert_eq!(marker.mark("one  two"), "one <eos> <bos> two");
    }

    #[test]
    fn test_single_space_untouched() {
        let marker = BoundaryMarker::new(false, false);
        assert_eq!(marker.mark("one two"), "one two");
    }

    #[test]
    fn test_runs_are_consumed_in_pairs() {
        let marker = BoundaryMarker::new(false, false);
        // three spaces: one pair replaced, one space left over
        assert_eq!(marker.mark("a   b"), "a <eos> <bos>  b");
        // four spaces: two pairs
        assert_eq!(
            marker.mark("a    b"),
            "a <eos> <bos>  <eos> <bos> b"
        );
    }

    #[test]
    fn test_wraps_line() {
        let marker = BoundaryMarker::default();
        assert_eq!(marker.mark("  hi "), "<bos> <eos> <bos> hi <eos>");
        assert_eq!(marker.mark(" hi "), "<bos> hi <eos>");
    }

    #[test]
    fn test_tab_pair_is_separator() {
        let marker = BoundaryMarker::new(true, false);
        assert_eq!(marker.mark("x\t\ty"), "<bos> x <eos> <bos> y");
    }
}
