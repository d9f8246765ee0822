//! Sentence splitting.

/// Split text into sentences.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace, or at the end
/// of the text. The whitespace between sentences is dropped; everything
/// else, including the terminator, stays in the sentence. Order is preserved.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let text = text.trim();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }

        let end = match chars.peek() {
            Some(&(next_idx, next)) if next.is_whitespace() => next_idx,
            _ => continue,
        };

        sentences.push(&text[start..end]);

        while let Some(&(_, w)) = chars.peek() {
            if !w.is_whitespace() {
                break;
            }
            chars.next();
        }
        start = chars.peek().map(|&(idx, _)| idx).unwrap_or(text.len());
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
}
