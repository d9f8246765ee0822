//! Heuristic output-language check.
//!
//! Models asked to answer in one language drift into another, usually
//! English. The check counts how many distinct common words of the
//! unwanted language occur in a response. It is a soft gate: failing it
//! triggers one regeneration, never an error.

use std::collections::HashSet;

use crate::types::config::LanguageProfile;

/// Responses of this many words or fewer are always accepted.
pub const MIN_WORDS_CHECKED: usize = 10;

/// Distinct forbidden tokens present in `text`.
///
/// Tokens are the whitespace-separated words of `text`, lowercased.
/// Punctuation stays attached, so "the," does not count as "the".
pub fn forbidden_token_count<S: AsRef<str>>(text: &str, forbidden: &[S]) -> usize {
    let tokens: HashSet<String> = text.split_whitespace().map(str::to_lowercase).collect();
    let forbidden: HashSet<String> = forbidden
        .iter()
        .map(|t| t.as_ref().to_lowercase())
        .collect();

    forbidden.intersection(&tokens).count()
}

/// Whether `text` passes the language check.
///
/// Fails only when the text has more than [`MIN_WORDS_CHECKED`] words and
/// more than `threshold` distinct forbidden tokens.
pub fn is_conformant<S: AsRef<str>>(text: &str, forbidden: &[S], threshold: usize) -> bool {
    if text.split_whitespace().count() <= MIN_WORDS_CHECKED {
        return true;
    }
    forbidden_token_count(text, forbidden) <= threshold
}

impl LanguageProfile {
    /// Check `text` against this profile's forbidden tokens and threshold.
    pub fn accepts(&self, text: &str) -> bool {
        is_conformant(text, &self.forbidden_tokens, self.threshold)
    }
}
