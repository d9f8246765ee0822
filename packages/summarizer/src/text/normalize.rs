//! Normalization of raw document text before chunking.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    // Word characters, whitespace and basic sentence punctuation survive.
    static ref DECORATION: Regex = Regex::new(r"[^\w\s.,!?—–-]").unwrap();
}

/// Flatten a document into a single line of plain prose.
///
/// Collapses every whitespace run (line breaks included) into one space,
/// drops characters other than word characters, whitespace and
/// `. , ! ? — – -`, then trims. Word characters are Unicode-aware, so
/// Cyrillic text survives intact.
pub fn normalize_document(text: &str) -> String {
    let flattened = WHITESPACE.replace_all(text, " ");
    let stripped = DECORATION.replace_all(&flattened, "");
    stripped.trim().to_string()
}
