//! Token normalization applied before counting and lookup.
//!
//! Numbers carry little lexical information, so every token made only of
//! ASCII digits collapses onto the single `<num>` placeholder.

use textprep_core::NUM_TOKEN;

/// Check whether a token consists solely of ASCII digits.
#[inline]
pub fn is_digit_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Rewrite a digit-only token to `<num>`, leaving any other token as is.
#[inline]
pub fn normalize_digits(token: &str) -> &str {
    if is_digit_token(token) {
        NUM_TOKEN
    } else {
        token
    }
}
