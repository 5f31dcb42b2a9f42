//! Pre-tokenization pipeline.
//!
//! This module provides the operations applied to raw text before it is
//! split into words, and to each word before it is counted or looked up.

pub mod normalize;
pub mod split;

pub use normalize::{is_digit_token, normalize_digits};
pub use split::BoundaryMarker;
